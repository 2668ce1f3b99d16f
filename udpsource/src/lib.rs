//! UDP network audio source.
//!
//! Receives raw PCM audio as UDP datagrams on a local port and presents
//! it as a continuous, pull-based byte stream suitable for feeding an
//! audio decoder. Datagram payloads are expected to already be in the
//! source's capture format (mono, 16-bit signed, 16 kHz,
//! little-endian); the source prepends a WAV header and attaches the
//! format descriptor when a consumer requests a stream.
//!
//! # Example
//!
//! ```rust,ignore
//! use hearth_audio::{AudioFormat, AudioSource, ByteStream};
//! use hearth_udpsource::{UdpAudioSource, UdpSourceOptions};
//!
//! let source = UdpAudioSource::new(UdpSourceOptions::default());
//! let mut stream = source.stream(&AudioFormat::default())?;
//! let mut samples = vec![0u8; 3200];
//! stream.read_exact(&mut samples)?;
//! ```

mod datagram;
mod source;

pub use datagram::*;
pub use source::*;

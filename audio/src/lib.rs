//! Audio format descriptors and byte-stream abstractions.
//!
//! This crate provides the types a live audio capability is built from:
//!
//! - [`AudioFormat`]: stream format descriptor with wildcard matching
//! - [`CaptureFormat`]: low-level capture line format and its conversion
//!   into a descriptor
//! - [`ByteStream`]: synchronous pull-based byte stream trait
//! - [`AudioStream`]: adapter that lets a format descriptor travel with
//!   a byte stream
//! - [`WavStream`]: WAV container framing for live PCM streams
//! - [`AudioSource`]: the capability interface producing audio streams
//!
//! # Example
//!
//! ```rust,ignore
//! use hearth_audio::{AudioFormat, AudioSource};
//!
//! let requested = AudioFormat::default(); // all fields wildcard
//! let stream = source.stream(&requested)?;
//! println!("receiving {}", stream.format());
//! ```

mod capture;
mod format;
mod source;
mod stream;
mod wav;

pub use capture::*;
pub use format::*;
pub use source::*;
pub use stream::*;
pub use wav::*;

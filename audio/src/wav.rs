//! WAV container framing for live PCM streams.

use crate::{AudioFormat, ByteStream, StreamError};

/// Length of the canonical PCM WAV header.
pub const WAV_HEADER_LEN: usize = 44;

/// RIFF/data size written for streams of unknown length.
const UNKNOWN_SIZE: u32 = 0xFFFF_FFFF;

/// Serves a WAV header in front of a live PCM byte stream.
///
/// The stream has no end, so the RIFF and data chunk sizes carry the
/// unknown-length sentinel; decoders treat that as "read until the
/// source stops". Once the header bytes are consumed every operation
/// forwards to the inner stream.
pub struct WavStream {
    header: [u8; WAV_HEADER_LEN],
    served: usize,
    inner: Box<dyn ByteStream>,
}

impl WavStream {
    /// Wraps `inner` so a WAV header derived from `format` precedes its
    /// bytes. Fails when the format lacks the attributes a PCM header
    /// needs or is not little-endian.
    pub fn new(inner: Box<dyn ByteStream>, format: &AudioFormat) -> Result<Self, StreamError> {
        Ok(Self {
            header: build_header(format)?,
            served: 0,
            inner,
        })
    }

    fn header_remaining(&self) -> usize {
        WAV_HEADER_LEN - self.served
    }
}

fn build_header(format: &AudioFormat) -> Result<[u8; WAV_HEADER_LEN], StreamError> {
    let frequency = format
        .frequency
        .ok_or(StreamError::Unframeable("frequency is unset"))?;
    let bit_depth = format
        .bit_depth
        .ok_or(StreamError::Unframeable("bit depth is unset"))?;
    if format.big_endian == Some(true) {
        return Err(StreamError::Unframeable("samples are big-endian"));
    }

    // The descriptor counts bits per frame; the sources here are mono,
    // so one frame is one sample.
    let channels: u16 = 1;
    let bits_per_sample = bit_depth as u16;
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = frequency as u32 * block_align as u32;

    let mut header = [0u8; WAV_HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&UNKNOWN_SIZE.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&(frequency as u32).to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&bits_per_sample.to_le_bytes());
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&UNKNOWN_SIZE.to_le_bytes());
    Ok(header)
}

impl ByteStream for WavStream {
    fn read_byte(&mut self) -> Result<u8, StreamError> {
        if self.served < WAV_HEADER_LEN {
            let value = self.header[self.served];
            self.served += 1;
            return Ok(value);
        }
        self.inner.read_byte()
    }

    fn read_exact(&mut self, dest: &mut [u8]) -> Result<usize, StreamError> {
        let from_header = self.header_remaining().min(dest.len());
        if from_header > 0 {
            dest[..from_header].copy_from_slice(&self.header[self.served..self.served + from_header]);
            self.served += from_header;
        }
        if from_header < dest.len() {
            self.inner.read_exact(&mut dest[from_header..])?;
        }
        Ok(dest.len())
    }

    fn skip(&mut self, len: u64) -> Result<u64, StreamError> {
        let from_header = (self.header_remaining() as u64).min(len);
        self.served += from_header as usize;
        let rest = len - from_header;
        if rest > 0 {
            self.inner.skip(rest)?;
        }
        Ok(len)
    }

    fn available(&self) -> usize {
        self.header_remaining() + self.inner.available()
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.inner.close()
    }
}

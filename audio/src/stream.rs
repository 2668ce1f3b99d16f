//! Byte-stream abstractions for live audio.

use crate::AudioFormat;
use std::io;

/// Error type for stream operations.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("stream is closed")]
    Closed,
    #[error("mark/reset not supported")]
    MarkNotSupported,
    #[error("datagram exceeded receive buffer capacity of {capacity} bytes")]
    Truncated { capacity: usize },
    #[error("cannot frame stream: {0}")]
    Unframeable(&'static str),
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> io::Error {
        match err {
            StreamError::Io(e) => e,
            e @ StreamError::Closed => io::Error::new(io::ErrorKind::NotConnected, e),
            e => io::Error::other(e),
        }
    }
}

/// A synchronous, pull-based stream of bytes.
///
/// Unlike `io::Read`, [`ByteStream::read_exact`] and
/// [`ByteStream::skip`] always satisfy the full request or fail; there
/// are no short reads. A call may block for as many underlying receives
/// as the request needs.
pub trait ByteStream: Send {
    /// Returns the next byte, blocking until one is available.
    fn read_byte(&mut self) -> Result<u8, StreamError>;

    /// Fills all of `dest`, blocking as often as necessary, and returns
    /// `dest.len()`. No byte is skipped or duplicated even when the
    /// request spans several underlying receives. On failure, bytes
    /// already copied into `dest` remain valid but the stream position
    /// for anything past them is lost.
    fn read_exact(&mut self, dest: &mut [u8]) -> Result<usize, StreamError>;

    /// Advances the stream by exactly `len` bytes, discarding them, and
    /// returns `len`.
    fn skip(&mut self, len: u64) -> Result<u64, StreamError>;

    /// Bytes that can be read right now without blocking.
    ///
    /// This is a lower bound: data already delivered by the transport
    /// but not yet pulled into the stream's buffer is not counted.
    fn available(&self) -> usize;

    /// Closes the stream and releases its resources. Closing is not
    /// idempotent: a second close fails with [`StreamError::Closed`].
    fn close(&mut self) -> Result<(), StreamError>;

    /// Whether the stream supports mark/reset checkpointing.
    fn mark_supported(&self) -> bool {
        false
    }

    /// Saves the current position so [`ByteStream::reset`] can rewind to
    /// it. Fails unless [`ByteStream::mark_supported`] returns true.
    fn mark(&mut self, _read_limit: usize) -> Result<(), StreamError> {
        Err(StreamError::MarkNotSupported)
    }

    /// Rewinds to the last mark. Fails unless
    /// [`ByteStream::mark_supported`] returns true.
    fn reset(&mut self) -> Result<(), StreamError> {
        Err(StreamError::MarkNotSupported)
    }
}

/// A byte stream traveling with the format of its content.
///
/// Pure decorator: every byte-level operation forwards verbatim to the
/// inner stream. Its only purpose is to let a format descriptor pass
/// through layers that know nothing beyond "a stream with a format".
pub struct AudioStream {
    inner: Box<dyn ByteStream>,
    format: AudioFormat,
}

impl AudioStream {
    /// Attaches `format` to `inner`.
    pub fn new(inner: Box<dyn ByteStream>, format: AudioFormat) -> Self {
        Self { inner, format }
    }

    /// The format of the bytes this stream produces.
    pub fn format(&self) -> &AudioFormat {
        &self.format
    }
}

impl ByteStream for AudioStream {
    fn read_byte(&mut self) -> Result<u8, StreamError> {
        self.inner.read_byte()
    }

    fn read_exact(&mut self, dest: &mut [u8]) -> Result<usize, StreamError> {
        self.inner.read_exact(dest)
    }

    fn skip(&mut self, len: u64) -> Result<u64, StreamError> {
        self.inner.skip(len)
    }

    fn available(&self) -> usize {
        self.inner.available()
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.inner.close()
    }

    fn mark_supported(&self) -> bool {
        self.inner.mark_supported()
    }

    fn mark(&mut self, read_limit: usize) -> Result<(), StreamError> {
        self.inner.mark(read_limit)
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        self.inner.reset()
    }
}

/// Best-effort `io::Read` view for feeding a decoder that expects a
/// standard reader. Blocks only for the first byte of each call; the
/// rest of the buffer is filled from what is already available.
impl io::Read for AudioStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let buffered = self.inner.available().min(buf.len());
        if buffered > 0 {
            self.inner.read_exact(&mut buf[..buffered])?;
            return Ok(buffered);
        }
        buf[0] = self.inner.read_byte()?;
        let more = self.inner.available().min(buf.len() - 1);
        if more > 0 {
            self.inner.read_exact(&mut buf[1..1 + more])?;
        }
        Ok(1 + more)
    }
}

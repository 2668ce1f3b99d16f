//! A byte stream fed by UDP datagrams.

use hearth_audio::{ByteStream, StreamError};
use std::net::{SocketAddr, UdpSocket};
use tracing::warn;

/// Default receive buffer capacity in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Presents the payloads of successive datagrams as one continuous byte
/// stream.
///
/// The buffer holds at most one datagram's payload; when it runs out,
/// the next read blocks on a fresh receive. Bytes are delivered in
/// datagram arrival order with nothing reordered, deduplicated or
/// retransmitted.
///
/// The capacity must be at least the largest expected datagram: a
/// larger one fails the read in progress with
/// [`StreamError::Truncated`] instead of silently dropping its tail.
pub struct DatagramStream {
    socket: Option<UdpSocket>,
    /// One spare byte past `capacity` so an oversized datagram is
    /// detectable rather than indistinguishable from an exact fit.
    buf: Vec<u8>,
    capacity: usize,
    filled: usize,
    pos: usize,
}

impl DatagramStream {
    /// Takes ownership of a bound socket, with the default capacity.
    pub fn new(socket: UdpSocket) -> Self {
        Self::with_capacity(socket, DEFAULT_BUFFER_CAPACITY)
    }

    /// Takes ownership of a bound socket, buffering up to `capacity`
    /// bytes per datagram.
    pub fn with_capacity(socket: UdpSocket, capacity: usize) -> Self {
        Self {
            socket: Some(socket),
            buf: vec![0; capacity + 1],
            capacity,
            filled: 0,
            pos: 0,
        }
    }

    /// The local address datagrams should be sent to.
    pub fn local_addr(&self) -> Result<SocketAddr, StreamError> {
        match self.socket.as_ref() {
            Some(socket) => Ok(socket.local_addr()?),
            None => Err(StreamError::Closed),
        }
    }

    /// Blocks until one datagram arrives and makes its payload the
    /// current buffer contents.
    fn receive(&mut self) -> Result<(), StreamError> {
        let received = match self.socket.as_ref() {
            Some(socket) => socket.recv(&mut self.buf)?,
            None => return Err(StreamError::Closed),
        };
        self.pos = 0;
        if received > self.capacity {
            self.filled = 0;
            warn!(capacity = self.capacity, "dropped datagram exceeding receive buffer");
            return Err(StreamError::Truncated {
                capacity: self.capacity,
            });
        }
        self.filled = received;
        Ok(())
    }
}

impl ByteStream for DatagramStream {
    fn read_byte(&mut self) -> Result<u8, StreamError> {
        if self.pos == self.filled {
            self.receive()?;
        }
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    fn read_exact(&mut self, dest: &mut [u8]) -> Result<usize, StreamError> {
        if self.pos == self.filled {
            self.receive()?;
        }

        let len = dest.len();
        let mut remaining = len;

        while self.available() < remaining {
            let buffered = self.available();
            let copied = len - remaining;
            dest[copied..copied + buffered].copy_from_slice(&self.buf[self.pos..self.pos + buffered]);
            remaining -= buffered;
            self.receive()?;
        }

        let copied = len - remaining;
        dest[copied..].copy_from_slice(&self.buf[self.pos..self.pos + remaining]);
        self.pos += remaining;
        Ok(len)
    }

    fn skip(&mut self, len: u64) -> Result<u64, StreamError> {
        if self.pos == self.filled {
            self.receive()?;
        }

        let mut remaining = len;

        while (self.available() as u64) < remaining {
            remaining -= self.available() as u64;
            self.receive()?;
        }

        self.pos += remaining as usize;
        Ok(len)
    }

    fn available(&self) -> usize {
        self.filled - self.pos
    }

    fn close(&mut self) -> Result<(), StreamError> {
        if self.socket.take().is_none() {
            return Err(StreamError::Closed);
        }
        self.buf = Vec::new();
        self.filled = 0;
        self.pos = 0;
        Ok(())
    }
}

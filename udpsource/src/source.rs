//! The UDP audio source endpoint.

use crate::datagram::{DEFAULT_BUFFER_CAPACITY, DatagramStream};
use hearth_audio::{
    AudioFormat, AudioSource, AudioStream, ByteStream, CaptureFormat, SourceError, StreamError,
    WavStream,
};
use std::io;
use std::net::UdpSocket;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Default UDP port audio is expected on.
pub const DEFAULT_PORT: u16 = 8888;

/// The capture format datagram payloads are expected to arrive in:
/// mono, 16-bit signed PCM at 16 kHz, little-endian.
const CAPTURE_FORMAT: CaptureFormat = CaptureFormat {
    sample_rate: 16_000.0,
    sample_size_bits: 16,
    channels: 1,
    signed: true,
    big_endian: false,
};

/// Options for [`UdpAudioSource`].
#[derive(Debug, Clone)]
pub struct UdpSourceOptions {
    /// Local UDP port to bind. Port 0 picks an ephemeral port.
    pub port: u16,
    /// Receive buffer capacity; must be at least the largest expected
    /// datagram.
    pub buffer_capacity: usize,
}

impl Default for UdpSourceOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl UdpSourceOptions {
    /// Sets the local port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the receive buffer capacity.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }
}

/// Handle to the one shared datagram stream. Every returned audio
/// stream reads through this lock, so consumers take turns pulling from
/// the same live byte sequence.
struct SharedStream(Arc<Mutex<DatagramStream>>);

impl SharedStream {
    fn lock(&self) -> Result<MutexGuard<'_, DatagramStream>, StreamError> {
        self.0
            .lock()
            .map_err(|e| StreamError::Io(io::Error::other(e.to_string())))
    }
}

impl ByteStream for SharedStream {
    fn read_byte(&mut self) -> Result<u8, StreamError> {
        self.lock()?.read_byte()
    }

    fn read_exact(&mut self, dest: &mut [u8]) -> Result<usize, StreamError> {
        self.lock()?.read_exact(dest)
    }

    fn skip(&mut self, len: u64) -> Result<u64, StreamError> {
        self.lock()?.skip(len)
    }

    fn available(&self) -> usize {
        self.lock().map(|stream| stream.available()).unwrap_or(0)
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.lock()?.close()
    }
}

/// An [`AudioSource`] fed by UDP datagrams on a fixed local port.
///
/// The underlying socket is bound lazily on the first stream request
/// and shared by every stream handed out afterwards; only one transport
/// endpoint ever exists per source.
pub struct UdpAudioSource {
    options: UdpSourceOptions,
    supported: AudioFormat,
    /// Uninitialized (`None`) until the first stream request binds the
    /// socket; active (`Some`) for the rest of the process lifetime.
    state: Mutex<Option<Arc<Mutex<DatagramStream>>>>,
}

impl UdpAudioSource {
    /// Creates a source with the given options. No socket is bound
    /// until the first stream request.
    pub fn new(options: UdpSourceOptions) -> Self {
        Self {
            options,
            supported: AudioFormat::from_capture(&CAPTURE_FORMAT),
            state: Mutex::new(None),
        }
    }

    /// The address datagrams should be sent to, once the source is
    /// active. `None` before the first stream request.
    pub fn local_addr(&self) -> Option<std::net::SocketAddr> {
        let slot = self.state.lock().ok()?;
        slot.as_ref()?.lock().ok()?.local_addr().ok()
    }

    /// Returns the shared datagram stream, binding the socket on first
    /// use. Guarded so concurrent first callers bind the port exactly
    /// once.
    fn shared_stream(&self) -> Result<Arc<Mutex<DatagramStream>>, SourceError> {
        let mut slot = self
            .state
            .lock()
            .map_err(|e| SourceError::Stream(StreamError::Io(io::Error::other(e.to_string()))))?;

        if let Some(stream) = slot.as_ref() {
            return Ok(stream.clone());
        }

        let socket =
            UdpSocket::bind(("0.0.0.0", self.options.port)).map_err(SourceError::Bind)?;
        debug!(port = self.options.port, "bound UDP audio socket");
        let stream = Arc::new(Mutex::new(DatagramStream::with_capacity(
            socket,
            self.options.buffer_capacity,
        )));
        *slot = Some(stream.clone());
        Ok(stream)
    }
}

impl Default for UdpAudioSource {
    fn default() -> Self {
        Self::new(UdpSourceOptions::default())
    }
}

impl AudioSource for UdpAudioSource {
    fn id(&self) -> &str {
        "udpaudiosource"
    }

    fn label(&self, _locale: Option<&str>) -> String {
        "UDP Network Audio Source".to_string()
    }

    fn supported_formats(&self) -> Vec<AudioFormat> {
        vec![self.supported.clone()]
    }

    fn stream(&self, requested: &AudioFormat) -> Result<AudioStream, SourceError> {
        if !self.supported.is_compatible(requested) {
            return Err(SourceError::Incompatible {
                requested: requested.clone(),
            });
        }

        let shared = SharedStream(self.shared_stream()?);
        let framed = WavStream::new(Box::new(shared), &self.supported)?;
        Ok(AudioStream::new(Box::new(framed), self.supported.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_audio::{CODEC_PCM_SIGNED, CONTAINER_WAVE};
    use std::sync::Barrier;
    use std::thread;

    fn test_source() -> UdpAudioSource {
        // Port 0 keeps parallel tests off each other's sockets.
        UdpAudioSource::new(UdpSourceOptions::default().with_port(0))
    }

    #[test]
    fn test_identity() {
        let source = test_source();
        assert_eq!(source.id(), "udpaudiosource");
        assert_eq!(source.label(None), "UDP Network Audio Source");
        assert_eq!(source.label(Some("de-DE")), "UDP Network Audio Source");
    }

    #[test]
    fn test_supported_format() {
        let source = test_source();
        let formats = source.supported_formats();
        assert_eq!(formats.len(), 1);

        let format = &formats[0];
        assert_eq!(format.container.as_deref(), Some(CONTAINER_WAVE));
        assert_eq!(format.codec.as_deref(), Some(CODEC_PCM_SIGNED));
        assert_eq!(format.big_endian, Some(false));
        assert_eq!(format.bit_depth, Some(16));
        assert_eq!(format.bit_rate, Some(256_000));
        assert_eq!(format.frequency, Some(16_000));
    }

    #[test]
    fn test_incompatible_request_binds_nothing() {
        let source = test_source();
        let requested = AudioFormat {
            frequency: Some(44_100),
            ..AudioFormat::default()
        };

        assert!(matches!(
            source.stream(&requested),
            Err(SourceError::Incompatible { .. })
        ));
        assert!(source.state.lock().unwrap().is_none());
        assert!(source.local_addr().is_none());
    }

    #[test]
    fn test_lazy_singleton() {
        let source = test_source();
        assert!(source.state.lock().unwrap().is_none());

        let first = source.shared_stream().unwrap();
        let second = source.shared_stream().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_first_requests_bind_once() {
        let source = Arc::new(test_source());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = source.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    source.shared_stream().unwrap()
                })
            })
            .collect();

        let streams: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for stream in &streams[1..] {
            assert!(Arc::ptr_eq(&streams[0], stream));
        }
    }

    #[test]
    fn test_stream_carries_supported_format() {
        let source = test_source();
        let stream = source.stream(&AudioFormat::default()).unwrap();
        assert_eq!(stream.format(), &source.supported);
    }

    #[test]
    fn test_bind_failure_surfaces() {
        // Occupy a port, then ask a second source for the same one.
        let taken = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let source = UdpAudioSource::new(UdpSourceOptions::default().with_port(port));
        match source.stream(&AudioFormat::default()) {
            Err(SourceError::Bind(_)) => {}
            Err(e) => panic!("expected bind error, got {e}"),
            Ok(_) => panic!("expected bind error, got a stream"),
        }
    }
}

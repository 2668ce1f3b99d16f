//! Audio source capability interface.

use crate::{AudioFormat, AudioStream, StreamError};

/// Error type for audio source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested format cannot be satisfied by any supported format.
    /// No stream (and no transport endpoint) is created.
    #[error("cannot produce streams in format {requested}")]
    Incompatible { requested: AudioFormat },
    /// The transport endpoint could not be opened.
    #[error("could not bind transport endpoint: {0}")]
    Bind(#[source] std::io::Error),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// A capability that produces live audio streams.
pub trait AudioSource: Send + Sync {
    /// Stable identifier of this source.
    fn id(&self) -> &str;

    /// Human-readable label, localized when the source supports the
    /// given locale.
    fn label(&self, locale: Option<&str>) -> String;

    /// The formats this source can produce.
    fn supported_formats(&self) -> Vec<AudioFormat>;

    /// Opens a stream whose content is compatible with `requested`.
    ///
    /// Fails with [`SourceError::Incompatible`] when `requested` does
    /// not match any supported format; in that case no resources are
    /// allocated.
    fn stream(&self, requested: &AudioFormat) -> Result<AudioStream, SourceError>;
}

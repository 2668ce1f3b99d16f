//! Audio format descriptors.

use std::fmt;

/// Container tag for WAV (RIFF) framed audio.
pub const CONTAINER_WAVE: &str = "WAVE";
/// Container tag for raw, unframed audio.
pub const CONTAINER_NONE: &str = "NONE";
/// Codec tag for signed PCM samples.
pub const CODEC_PCM_SIGNED: &str = "PCM_SIGNED";
/// Codec tag for unsigned PCM samples.
pub const CODEC_PCM_UNSIGNED: &str = "PCM_UNSIGNED";

/// Describes the format of a byte stream's audio content.
///
/// Every field is optional; an unset field acts as a wildcard when
/// matching with [`AudioFormat::is_compatible`]. A descriptor is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioFormat {
    /// Container the samples are framed in (e.g. [`CONTAINER_WAVE`]).
    pub container: Option<String>,
    /// Codec of the samples (e.g. [`CODEC_PCM_SIGNED`]).
    pub codec: Option<String>,
    /// True if samples are big-endian.
    pub big_endian: Option<bool>,
    /// Bits per frame (sample size times channel count).
    pub bit_depth: Option<u32>,
    /// Bits per second.
    pub bit_rate: Option<u32>,
    /// Sample frequency in Hz.
    pub frequency: Option<u64>,
}

impl AudioFormat {
    /// Creates a fully specified descriptor.
    pub fn new(
        container: &str,
        codec: &str,
        big_endian: bool,
        bit_depth: u32,
        bit_rate: u32,
        frequency: u64,
    ) -> Self {
        Self {
            container: Some(container.to_string()),
            codec: Some(codec.to_string()),
            big_endian: Some(big_endian),
            bit_depth: Some(bit_depth),
            bit_rate: Some(bit_rate),
            frequency: Some(frequency),
        }
    }

    /// Returns true if `other` can be satisfied by this format.
    ///
    /// A field takes part in the match only when both sides set it; an
    /// unset field on either side acts as a wildcard.
    pub fn is_compatible(&self, other: &AudioFormat) -> bool {
        fn matches<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
        }

        matches(&self.container, &other.container)
            && matches(&self.codec, &other.codec)
            && matches(&self.big_endian, &other.big_endian)
            && matches(&self.bit_depth, &other.bit_depth)
            && matches(&self.bit_rate, &other.bit_rate)
            && matches(&self.frequency, &other.frequency)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(container) = &self.container {
            parts.push(container.clone());
        }
        if let Some(codec) = &self.codec {
            parts.push(codec.clone());
        }
        if let Some(depth) = self.bit_depth {
            parts.push(format!("{depth} bit"));
        }
        if let Some(rate) = self.bit_rate {
            parts.push(format!("{rate} bit/s"));
        }
        if let Some(frequency) = self.frequency {
            parts.push(format!("{frequency} Hz"));
        }
        if let Some(big_endian) = self.big_endian {
            parts.push(if big_endian { "big-endian" } else { "little-endian" }.to_string());
        }
        if parts.is_empty() {
            f.write_str("unspecified")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

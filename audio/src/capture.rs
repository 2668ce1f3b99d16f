//! Low-level capture line formats.

use crate::{AudioFormat, CODEC_PCM_SIGNED, CODEC_PCM_UNSIGNED, CONTAINER_WAVE};

/// Sentinel value for capture format fields the line does not report.
pub const NOT_SPECIFIED: i32 = -1;

/// The raw format of an audio capture line.
///
/// This mirrors what capture hardware (or the transport standing in for
/// it) reports about the PCM bytes it delivers. Unknown attributes carry
/// the [`NOT_SPECIFIED`] sentinel; the conversion into an
/// [`AudioFormat`] turns those into unset fields instead of letting the
/// sentinel escape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureFormat {
    /// Samples per second, or [`NOT_SPECIFIED`].
    pub sample_rate: f32,
    /// Bits per sample, or [`NOT_SPECIFIED`].
    pub sample_size_bits: i32,
    /// Channel count, or [`NOT_SPECIFIED`].
    pub channels: i32,
    /// True for signed sample values.
    pub signed: bool,
    /// True for big-endian byte order.
    pub big_endian: bool,
}

impl CaptureFormat {
    /// Creates a fully specified capture format.
    pub fn new(sample_rate: f32, sample_size_bits: i32, channels: i32, signed: bool, big_endian: bool) -> Self {
        Self {
            sample_rate,
            sample_size_bits,
            channels,
            signed,
            big_endian,
        }
    }

    /// Bytes in one sample frame (one sample per channel), or
    /// [`NOT_SPECIFIED`] when sample size or channel count is unknown.
    pub fn frame_size(&self) -> i32 {
        if self.sample_size_bits == NOT_SPECIFIED || self.channels == NOT_SPECIFIED {
            return NOT_SPECIFIED;
        }
        self.channels * self.sample_size_bits / 8
    }

    /// Frames per second. For PCM this equals the sample rate.
    pub fn frame_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Name of the PCM encoding carried by the line.
    pub fn encoding(&self) -> &'static str {
        if self.signed { CODEC_PCM_SIGNED } else { CODEC_PCM_UNSIGNED }
    }
}

impl AudioFormat {
    /// Converts a low-level capture line format into a stream descriptor.
    ///
    /// The container is tagged as WAV-framed PCM. Attributes the capture
    /// line reports as unspecified are left unset rather than carrying
    /// the sentinel through.
    pub fn from_capture(capture: &CaptureFormat) -> AudioFormat {
        let frame_size = capture.frame_size();
        let bits_per_frame = frame_size * 8;
        let bit_depth = (frame_size != NOT_SPECIFIED).then_some(bits_per_frame as u32);

        let frame_rate = capture.frame_rate();
        let bit_rate = (frame_rate != NOT_SPECIFIED as f32 && frame_size != NOT_SPECIFIED)
            .then_some((frame_rate * bits_per_frame as f32) as u32);

        let frequency =
            (capture.sample_rate != NOT_SPECIFIED as f32).then_some(capture.sample_rate as u64);

        AudioFormat {
            container: Some(CONTAINER_WAVE.to_string()),
            codec: Some(capture.encoding().to_string()),
            big_endian: Some(capture.big_endian),
            bit_depth,
            bit_rate,
            frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_mono_16k() {
        let capture = CaptureFormat::new(16_000.0, 16, 1, true, false);
        let format = AudioFormat::from_capture(&capture);

        assert_eq!(format.container.as_deref(), Some(CONTAINER_WAVE));
        assert_eq!(format.codec.as_deref(), Some(CODEC_PCM_SIGNED));
        assert_eq!(format.big_endian, Some(false));
        assert_eq!(format.bit_depth, Some(16));
        assert_eq!(format.bit_rate, Some(256_000));
        assert_eq!(format.frequency, Some(16_000));
    }

    #[test]
    fn test_convert_stereo_cd() {
        let capture = CaptureFormat::new(44_100.0, 16, 2, true, true);
        let format = AudioFormat::from_capture(&capture);

        // 2 channels * 16 bits = 32 bits per frame
        assert_eq!(format.bit_depth, Some(32));
        assert_eq!(format.bit_rate, Some(1_411_200));
        assert_eq!(format.frequency, Some(44_100));
        assert_eq!(format.big_endian, Some(true));
    }

    #[test]
    fn test_unspecified_maps_to_unset() {
        let capture = CaptureFormat::new(
            NOT_SPECIFIED as f32,
            NOT_SPECIFIED,
            NOT_SPECIFIED,
            false,
            false,
        );
        let format = AudioFormat::from_capture(&capture);

        assert_eq!(format.bit_depth, None);
        assert_eq!(format.bit_rate, None);
        assert_eq!(format.frequency, None);
        assert_eq!(format.codec.as_deref(), Some(CODEC_PCM_UNSIGNED));
    }

    #[test]
    fn test_unknown_frame_size_suppresses_bit_rate() {
        // Sample rate known but frame layout unknown: no bit rate can be
        // derived without propagating the sentinel into the arithmetic.
        let capture = CaptureFormat::new(16_000.0, NOT_SPECIFIED, 1, true, false);
        let format = AudioFormat::from_capture(&capture);

        assert_eq!(format.bit_depth, None);
        assert_eq!(format.bit_rate, None);
        assert_eq!(format.frequency, Some(16_000));
    }
}

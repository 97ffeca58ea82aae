//! WAV file reading and writing.

use crate::{Error, Result, StereoSamples};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Bit depths [`write_wav_stereo`] can produce. 32 means IEEE float.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::stereo(48000, 32)
    }
}

impl WavSpec {
    /// Two-channel spec at the given rate and depth.
    pub fn stereo(sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bits_per_sample,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as stereo, along with its original spec.
///
/// Mono files are duplicated to both channels. Files with more than two
/// channels keep only the first two. Integer samples are scaled to
/// `[-1, 1)`.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let all_samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let stereo = match channels {
        1 => StereoSamples::from_mono(all_samples),
        2 => StereoSamples::from_interleaved(&all_samples),
        _ => {
            let (left, right) = all_samples
                .chunks_exact(channels)
                .map(|frame| (frame[0], frame[1]))
                .unzip();
            StereoSamples::new(left, right)
        }
    };

    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = stereo.len(),
        "read WAV"
    );

    Ok((stereo, spec))
}

/// Write stereo samples to a WAV file.
///
/// `spec.channels` is ignored; the file always has two channels. 16 and 24
/// bits write clamped integer PCM, 32 bits writes IEEE float.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    if !SUPPORTED_BIT_DEPTHS.contains(&spec.bits_per_sample) {
        return Err(Error::UnsupportedBitDepth(spec.bits_per_sample));
    }

    let stereo_spec = WavSpec::stereo(spec.sample_rate, spec.bits_per_sample);
    let mut writer = WavWriter::create(path, hound::WavSpec::from(stereo_spec))?;

    if spec.bits_per_sample == 32 {
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        let quantize = |s: f32| (s * max_val).clamp(-max_val, max_val - 1.0) as i32;
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(quantize(*l))?;
            writer.write_sample(quantize(*r))?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "wrote WAV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn write_raw_f32(path: &Path, channels: u16, interleaved: &[f32]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for s in interleaved {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_read_mono_as_stereo() {
        let mono: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let file = NamedTempFile::new().unwrap();
        write_raw_f32(file.path(), 1, &mono);

        let (stereo, spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(spec.channels, 1);
        assert_eq!(stereo.left, mono);
        assert_eq!(stereo.right, mono);
    }

    #[test]
    fn test_read_multichannel_keeps_first_two() {
        let interleaved = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        let file = NamedTempFile::new().unwrap();
        write_raw_f32(file.path(), 4, &interleaved);

        let (stereo, spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(spec.channels, 4);
        assert_eq!(stereo.left, vec![0.1, 0.5]);
        assert_eq!(stereo.right, vec![0.2, 0.6]);
    }

    #[test]
    fn test_roundtrip_i16() {
        let left: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        let samples = StereoSamples::new(left.clone(), right.clone());

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, WavSpec::stereo(44100, 16)).unwrap();

        let (loaded, spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(spec, WavSpec::stereo(44100, 16));
        for (a, b) in left.iter().zip(loaded.left.iter()) {
            assert!((a - b).abs() < 0.001);
        }
        for (a, b) in right.iter().zip(loaded.right.iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_int_output_clamps() {
        let samples = StereoSamples::new(vec![2.0, -2.0], vec![0.0, 1.0]);
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, WavSpec::stereo(48000, 24)).unwrap();

        let (loaded, _) = read_wav_stereo(file.path()).unwrap();
        assert!(loaded.left[0] < 1.0 && loaded.left[0] > 0.999);
        assert_eq!(loaded.left[1], -1.0);
        assert!(loaded.right[1] < 1.0);
    }

    #[test]
    fn test_unsupported_bit_depth() {
        let file = NamedTempFile::new().unwrap();
        let result = write_wav_stereo(
            file.path(),
            &StereoSamples::silence(4),
            WavSpec::stereo(48000, 8),
        );
        assert!(matches!(result, Err(Error::UnsupportedBitDepth(8))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_wav_stereo("/nonexistent/roboverb/input.wav").is_err());
    }
}

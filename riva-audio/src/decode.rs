//! Decode strategies for reading audio files into raw samples.

use crate::error::DecodeError;
use crate::types::{AudioInfo, DecodedAudio};
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// A way of reading an audio file into interleaved f32 samples.
///
/// Strategies are tried in order by the normalizer: a fast native WAV
/// reader first, then the codec fallback for everything else. Each
/// strategy reports failures through [`DecodeError`] so the next one can
/// take over.
pub trait DecodeStrategy {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Read audio properties without decoding the whole stream when the
    /// container allows it.
    fn probe(&self, path: &Path) -> Result<AudioInfo, DecodeError>;

    /// Decode the full stream into interleaved samples in [-1.0, 1.0].
    fn decode(&self, path: &Path) -> Result<DecodedAudio, DecodeError>;
}

/// Native WAV strategy backed by hound.
///
/// Handles PCM and IEEE float WAV files. Fails fast on anything that is
/// not a RIFF/WAVE stream so the codec fallback gets its turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct WavDecoder;

impl DecodeStrategy for WavDecoder {
    fn name(&self) -> &'static str {
        "wav"
    }

    fn probe(&self, path: &Path) -> Result<AudioInfo, DecodeError> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();

        Ok(AudioInfo {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            frames: reader.duration() as u64,
            format: "WAV".to_string(),
            bits_per_sample: Some(spec.bits_per_sample),
        })
    }

    fn decode(&self, path: &Path) -> Result<DecodedAudio, DecodeError> {
        let mut reader = WavReader::open(path)?;
        let spec = reader.spec();

        if spec.channels == 0 {
            return Err(DecodeError::InvalidChannels(spec.channels));
        }

        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader.samples::<f32>().collect::<hound::Result<_>>()?,
            SampleFormat::Int => {
                // Scale by the full range of the source bit depth so
                // 8/16/24/32-bit PCM all land in [-1.0, 1.0].
                let scale = (1u32 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / scale))
                    .collect::<hound::Result<_>>()?
            }
        };

        Ok(DecodedAudio {
            samples,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn create_test_wav(
        path: &Path,
        sample_rate: u32,
        channels: u16,
        samples: &[f32],
    ) -> hound::Result<()> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec)?;
        for &sample in samples {
            writer.write_sample((sample * 32767.0) as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }

    #[test]
    fn probes_wav_header() {
        let path = std::env::temp_dir().join("decode_probe.wav");
        create_test_wav(&path, 44100, 2, &[0.0; 400]).unwrap();

        let info = WavDecoder.probe(&path).unwrap();

        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.channels, 2);
        assert_eq!(info.frames, 200);
        assert_eq!(info.format, "WAV");
        assert_eq!(info.bits_per_sample, Some(16));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn decodes_int_samples_to_float() {
        let path = std::env::temp_dir().join("decode_int.wav");
        create_test_wav(&path, 16000, 1, &[0.5, -0.5, 0.0]).unwrap();

        let decoded = WavDecoder.decode(&path).unwrap();

        assert_eq!(decoded.sample_rate, 16000);
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.frames(), 3);
        assert!((decoded.samples[0] - 0.5).abs() < 0.01);
        assert!((decoded.samples[1] + 0.5).abs() < 0.01);
        assert!(decoded.samples[2].abs() < 0.01);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn decodes_float_wavs() {
        let path = std::env::temp_dir().join("decode_float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for &sample in &[0.25f32, -0.75, 1.0] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let decoded = WavDecoder.decode(&path).unwrap();

        assert_eq!(decoded.samples, vec![0.25, -0.75, 1.0]);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_non_wav_bytes() {
        let path = std::env::temp_dir().join("decode_garbage.wav");
        std::fs::write(&path, b"definitely not a RIFF header").unwrap();

        assert!(WavDecoder.probe(&path).is_err());
        assert!(WavDecoder.decode(&path).is_err());

        std::fs::remove_file(path).ok();
    }
}

//! Audio normalization to the canonical transcription format.

use crate::decode::{DecodeStrategy, WavDecoder};
use crate::error::{Error, Result};
use crate::format::AudioFormat;
use crate::resample::resample;
use crate::types::{AudioInfo, DecodedAudio};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};

/// Sample rate the transcription service expects (16kHz)
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Channel count the transcription service expects (mono)
pub const TARGET_CHANNELS: u16 = 1;

/// Bit depth the transcription service expects
pub const TARGET_BIT_DEPTH: u16 = 16;

/// Longest clip the service handles well, in seconds (10 minutes)
pub const MAX_DURATION_SECS: f64 = 600.0;

/// Shortest clip worth transcribing, in seconds (100ms)
pub const MIN_DURATION_SECS: f64 = 0.1;

/// Converts uploaded audio into the canonical form the transcription
/// service expects: mono, 16kHz, 16-bit PCM WAV.
///
/// Holds an ordered chain of [`DecodeStrategy`] implementations. The
/// native WAV reader runs first; when it cannot read a file the codec
/// fallback takes over. Conversion fails only when every strategy has
/// failed.
pub struct Normalizer {
    strategies: Vec<Box<dyn DecodeStrategy>>,
}

impl Normalizer {
    /// Normalizer with the full strategy chain.
    pub fn new() -> Self {
        let mut strategies: Vec<Box<dyn DecodeStrategy>> = vec![Box::new(WavDecoder)];
        #[cfg(feature = "codecs")]
        strategies.push(Box::new(crate::codec::SymphoniaDecoder));
        Self { strategies }
    }

    /// Normalizer with a caller-supplied strategy chain, tried in order.
    pub fn with_strategies(strategies: Vec<Box<dyn DecodeStrategy>>) -> Self {
        Self { strategies }
    }

    /// Read audio properties without converting.
    ///
    /// Returns `Ok(None)` when the file exists but no strategy can read
    /// it, keeping "unreadable" distinct from "missing".
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the path does not exist.
    pub fn inspect(&self, path: impl AsRef<Path>) -> Result<Option<AudioInfo>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        for strategy in &self.strategies {
            match strategy.probe(path) {
                Ok(info) => return Ok(Some(info)),
                Err(err) => {
                    tracing::debug!(strategy = strategy.name(), error = %err, "probe failed");
                }
            }
        }

        Ok(None)
    }

    /// Convert an audio file to mono 16kHz 16-bit PCM WAV.
    ///
    /// When `output` is `None` the result lands in the system temp
    /// directory under a unique name derived from the input stem; callers
    /// own the returned file and should [`cleanup`] it when done.
    ///
    /// # Errors
    ///
    /// Returns an error when the extension is unsupported, the input is
    /// missing, every decode strategy fails, or the output cannot be
    /// written.
    pub fn convert_to_canonical(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let input = input.as_ref();

        let Some(format) = AudioFormat::from_path(input) else {
            return Err(Error::UnsupportedFormat(extension_label(input)));
        };
        if !input.exists() {
            return Err(Error::NotFound(input.to_path_buf()));
        }

        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => temp_output_path(input)?,
        };

        tracing::info!(
            input = %input.display(),
            output = %output_path.display(),
            format = %format,
            "converting audio"
        );

        let mut last_err = None;
        for strategy in &self.strategies {
            match strategy.decode(input) {
                Ok(decoded) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        sample_rate = decoded.sample_rate,
                        channels = decoded.channels,
                        frames = decoded.frames(),
                        "decoded input"
                    );
                    self.write_canonical(decoded, &output_path)?;
                    self.check_converted(&output_path);
                    return Ok(output_path);
                }
                Err(err) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        error = %err,
                        "decode failed, trying next strategy"
                    );
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) => Err(Error::Conversion(err)),
            // Empty chains cannot decode anything; report the input as
            // unreadable rather than panic.
            None => Err(Error::Unreadable(input.to_path_buf())),
        }
    }

    /// Check whether a file already matches what the service expects.
    ///
    /// Never fails: problems are reported through the returned message.
    /// Duration limits are advisory only; they flag files the service
    /// handles poorly but do not block conversion.
    pub fn validate_for_target(&self, path: impl AsRef<Path>) -> (bool, String) {
        let info = match self.inspect(path.as_ref()) {
            Ok(Some(info)) => info,
            Ok(None) => return (false, "Could not read audio file information".to_string()),
            Err(err) => return (false, format!("Error validating audio file: {err}")),
        };

        let mut issues = Vec::new();

        if info.sample_rate != TARGET_SAMPLE_RATE {
            issues.push(format!(
                "Sample rate should be {TARGET_SAMPLE_RATE}Hz (got {}Hz)",
                info.sample_rate
            ));
        }

        if info.channels != TARGET_CHANNELS {
            issues.push(format!("Should be mono (got {} channels)", info.channels));
        }

        let duration = info.duration_secs();
        if duration > MAX_DURATION_SECS {
            issues.push(format!(
                "File too long ({duration:.1}s). Consider splitting into smaller segments."
            ));
        }
        if duration < MIN_DURATION_SECS {
            issues.push(format!("File too short ({duration:.3}s)"));
        }

        if issues.is_empty() {
            (true, "Audio file is compatible with Riva service".to_string())
        } else {
            (false, format!("Issues found: {}", issues.join("; ")))
        }
    }

    fn write_canonical(&self, decoded: DecodedAudio, output: &Path) -> Result<()> {
        let DecodedAudio {
            samples,
            sample_rate,
            channels,
        } = decoded;

        let mono = if channels > 1 {
            downmix_to_mono(&samples, channels)
        } else {
            samples
        };

        let resampled = if sample_rate != TARGET_SAMPLE_RATE {
            resample(&mono, sample_rate, TARGET_SAMPLE_RATE)
        } else {
            mono
        };

        let spec = WavSpec {
            channels: TARGET_CHANNELS,
            sample_rate: TARGET_SAMPLE_RATE,
            bits_per_sample: TARGET_BIT_DEPTH,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(output, spec)?;
        for &sample in &resampled {
            writer.write_sample(quantize(sample))?;
        }
        writer.finalize()?;

        Ok(())
    }

    /// Re-inspect a freshly written file and warn on any mismatch. The
    /// conversion result is still returned to the caller either way.
    fn check_converted(&self, output: &Path) {
        match self.inspect(output) {
            Ok(Some(info)) => {
                if info.sample_rate != TARGET_SAMPLE_RATE {
                    tracing::warn!(
                        expected = TARGET_SAMPLE_RATE,
                        got = info.sample_rate,
                        "sample rate mismatch after conversion"
                    );
                }
                if info.channels != TARGET_CHANNELS {
                    tracing::warn!(
                        expected = TARGET_CHANNELS,
                        got = info.channels,
                        "channel count mismatch after conversion"
                    );
                }
                tracing::info!(
                    sample_rate = info.sample_rate,
                    channels = info.channels,
                    frames = info.frames,
                    "conversion complete"
                );
            }
            Ok(None) | Err(_) => {
                tracing::warn!(output = %output.display(), "could not re-inspect converted file");
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Delete temporary files, ignoring paths that are already gone.
///
/// Failures are logged and skipped so one stuck file does not leave the
/// rest behind. Safe to call twice with the same paths.
pub fn cleanup<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            continue;
        }
        match std::fs::remove_file(path) {
            Ok(()) => tracing::info!(path = %path.display(), "removed temporary file"),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "failed to remove temporary file");
            }
        }
    }
}

/// Clamp to [-1.0, 1.0], scale to 16-bit range, truncate toward zero.
fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    samples
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

fn extension_label(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "<none>".to_string())
}

/// Unique output path in the system temp directory, named after the
/// input so leftover files are traceable to their source.
fn temp_output_path(input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");

    let path = tempfile::Builder::new()
        .prefix(&format!("converted_{stem}_"))
        .suffix(".wav")
        .tempfile()?
        .into_temp_path()
        .keep()
        .map_err(|err| err.error)?;

    Ok(path)
}

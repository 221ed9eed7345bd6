//! Core types for riva-audio

/// Audio properties read from a file header or a full decode.
///
/// Frame counts are per channel: a one-second stereo file at 16kHz has
/// 16000 frames, not 32000.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioInfo {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Number of frames (samples per channel)
    pub frames: u64,
    /// Container label such as `"WAV"`, or `"unknown"` when only the
    /// fallback reader could open the file
    pub format: String,
    /// Bit depth when the source reports one
    pub bits_per_sample: Option<u16>,
}

impl AudioInfo {
    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }
}

/// Raw decoded audio as interleaved f32 samples in [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct DecodedAudio {
    /// Interleaved samples, `frames * channels` long
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
}

impl DecodedAudio {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }
}

//! riva-audio: audio normalization for Riva speech services.
//!
//! Uploaded recordings arrive in whatever shape the browser or phone
//! produced; the transcription backend wants exactly one: mono, 16kHz,
//! 16-bit PCM WAV. This crate inspects, validates, and converts audio
//! into that canonical form.
//!
//! # Architecture
//!
//! Decoding goes through an ordered chain of [`decode::DecodeStrategy`]
//! implementations: a fast native WAV reader first, then a Symphonia
//! fallback for compressed formats (behind the on-by-default `codecs`
//! feature). The [`Normalizer`] drives the chain and owns the transform
//! steps: channel down-mix, FFT resampling, and 16-bit quantization.
//!
//! # Quick Start
//!
//! ```ignore
//! use riva_audio::Normalizer;
//!
//! let normalizer = Normalizer::new();
//!
//! let (ready, message) = normalizer.validate_for_target("upload.mp3");
//! if !ready {
//!     let wav = normalizer.convert_to_canonical("upload.mp3", None)?;
//!     println!("converted to {}", wav.display());
//! }
//! ```

#[cfg(feature = "codecs")]
pub mod codec;
pub mod decode;
pub mod error;
pub mod format;
pub mod normalize;
pub mod resample;
pub mod types;

pub use error::{DecodeError, Error, Result};
pub use format::{AudioFormat, is_supported, supported_extensions};
pub use normalize::{
    MAX_DURATION_SECS, MIN_DURATION_SECS, Normalizer, TARGET_BIT_DEPTH, TARGET_CHANNELS,
    TARGET_SAMPLE_RATE, cleanup,
};
pub use types::{AudioInfo, DecodedAudio};

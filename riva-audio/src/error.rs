//! Error types for riva-audio organized by processing stage.

use std::path::PathBuf;
use thiserror::Error;

/// Audio normalization error variants organized by processing stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Input extension is outside the supported set
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Input path does not exist
    #[error("audio file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists but no strategy could read its properties
    #[error("could not read audio properties: {}", .0.display())]
    Unreadable(PathBuf),

    /// Every decode strategy failed; carries the last failure
    #[error("audio conversion failed")]
    Conversion(#[source] DecodeError),

    /// IO error outside any decoder
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// WAV encoding error
    #[error(transparent)]
    Wav(#[from] hound::Error),
}

/// Errors produced by a single decode strategy.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Container holds no decodable audio track
    #[error("no audio track found")]
    NoAudioTrack,

    /// Source did not report a sample rate
    #[error("source did not report a sample rate")]
    UnknownSampleRate,

    /// Decoding finished without producing any samples
    #[error("no audio samples decoded")]
    EmptyStream,

    /// Channel count is unusable
    #[error("invalid channel count: {0}")]
    InvalidChannels(u16),

    /// WAV parsing error
    #[error(transparent)]
    Wav(#[from] hound::Error),

    /// Container or codec error
    #[cfg(feature = "codecs")]
    #[error(transparent)]
    Codec(#[from] symphonia::core::errors::Error),

    /// IO error while reading the source
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for riva-audio operations.
pub type Result<T> = std::result::Result<T, Error>;

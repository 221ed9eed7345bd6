//! Error types for riva-client.

use std::path::PathBuf;
use thiserror::Error;

/// Client error variants, from configuration through the wire.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No endpoint configured
    #[error("RIVA_BASE_URL environment variable must be set or base_url provided")]
    MissingBaseUrl,

    /// Token file missing, unreadable, or without a usable credential
    #[error("could not obtain API key from {}: {reason}", path.display())]
    Token { path: PathBuf, reason: String },

    /// Upload source missing before any request was made
    #[error("audio file not found: {}", .0.display())]
    AudioNotFound(PathBuf),

    /// Backend answered with a non-success status
    #[error("request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// IO error reading the upload
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for riva-client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

//! riva-client: HTTP access to Riva transcription and translation.
//!
//! Thin blocking client for a Riva speech deployment: multipart audio
//! uploads with bearer authentication, response-text extraction, and a
//! reachability probe. Endpoint and credential come from `RIVA_BASE_URL`
//! and the session token file, or can be passed explicitly.

pub mod client;
pub mod error;
pub mod token;

pub use client::{BASE_URL_ENV, RivaClient};
pub use error::{ClientError, Result};
pub use token::{DEFAULT_TOKEN_PATH, read_access_token};

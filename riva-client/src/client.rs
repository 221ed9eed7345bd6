//! Blocking HTTP client for the Riva transcription endpoints.

use crate::error::{ClientError, Result};
use crate::token::{DEFAULT_TOKEN_PATH, read_access_token};
use reqwest::blocking::Client;
use reqwest::blocking::multipart::Form;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the service endpoint.
pub const BASE_URL_ENV: &str = "RIVA_BASE_URL";

// Five-minute ceiling: uploads of multi-minute recordings plus server-side
// inference can legitimately take a while.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

const HEALTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Riva speech service.
///
/// Uploads audio as multipart form data with bearer authentication and
/// extracts the recognized text from the JSON response. All calls block;
/// the surrounding pipeline is synchronous end to end.
pub struct RivaClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RivaClient {
    /// Build a client from `RIVA_BASE_URL` and the session token file.
    ///
    /// # Errors
    ///
    /// Returns an error when the environment variable is unset or the
    /// token file cannot be read.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .ok_or(ClientError::MissingBaseUrl)?;
        let api_key = read_access_token(DEFAULT_TOKEN_PATH)?;
        Self::new(base_url, api_key)
    }

    /// Build a client against an explicit endpoint and credential.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        tracing::info!(base_url = %base_url, "initialized Riva client");

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Endpoint this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload audio for transcription and return the recognized text.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing, the request fails, or
    /// the backend answers with a non-success status.
    pub fn transcribe(&self, audio: &Path, language: &str) -> Result<String> {
        let body = self.upload("audio/transcriptions", audio, language)?;
        Ok(extract_text(&body, &["text", "transcription", "transcript"]))
    }

    /// Upload audio for translation and return the translated text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RivaClient::transcribe`].
    pub fn translate(&self, audio: &Path, language: &str) -> Result<String> {
        let body = self.upload("audio/translations", audio, language)?;
        Ok(extract_text(&body, &["text", "translation", "transcript"]))
    }

    fn upload(&self, endpoint: &str, audio: &Path, language: &str) -> Result<Value> {
        if !audio.exists() {
            return Err(ClientError::AudioNotFound(audio.to_path_buf()));
        }

        let url = format!("{}/{endpoint}", self.base_url);
        let form = Form::new()
            .text("language", language.to_string())
            .file("file", audio)?;

        tracing::info!(url = %url, audio = %audio.display(), language, "uploading audio");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "upload rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json()?;
        tracing::info!("upload completed");
        Ok(body)
    }

    /// Probe whether the service endpoint is reachable.
    ///
    /// Any HTTP response counts, 404 included: the base URL is not
    /// required to serve a document, only to answer. Transport failures
    /// are the only negative signal.
    pub fn health_check(&self) -> bool {
        let request = self
            .http
            .get(&self.base_url)
            .bearer_auth(&self.api_key)
            .timeout(HEALTH_TIMEOUT);

        match request.send() {
            Ok(response) => {
                tracing::info!(status = response.status().as_u16(), "health check response");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "health check failed");
                false
            }
        }
    }
}

/// Pull the result text out of a response body, trying each key in order
/// and skipping empty values. Deployments differ in which field they use;
/// the raw body is the last resort so the caller always sees something.
fn extract_text(body: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| {
            body.get(key)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

//! Application configuration loaded from a deployment JSON file.
//!
//! Deployments ship a config file with language and size settings; every
//! field has a default so the CLI also works with no file at all.

use serde::Deserialize;
use std::path::Path;

/// Default location of the deployment configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "data/sample_config.json";

/// Settings the CLI consumes. Unknown keys in the file are ignored, so
/// richer deployment configs load fine.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language sent when the user does not pass one
    pub default_language: String,
    /// Languages the deployment advertises
    pub supported_languages: Vec<String>,
    /// Upload size cap in megabytes
    pub max_file_size_mb: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: "en-US".to_string(),
            supported_languages: [
                "en-US", "en-GB", "es-ES", "fr-FR", "de-DE", "it-IT", "pt-BR", "ja-JP", "ko-KR",
                "zh-CN",
            ]
            .map(String::from)
            .to_vec(),
            max_file_size_mb: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration, falling back to defaults when the file is
    /// absent or unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = ?path.display(), error = %err, "no config file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(config) => {
                tracing::info!(path = ?path.display(), "loaded configuration");
                config
            }
            Err(err) => {
                tracing::warn!(path = ?path.display(), error = %err, "invalid config file, using defaults");
                Self::default()
            }
        }
    }
}

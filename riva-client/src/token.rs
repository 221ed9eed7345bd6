//! Bearer credential loading from the session token file.

use crate::error::{ClientError, Result};
use serde::Deserialize;
use std::path::Path;

/// Well-known location of the JSON token file issued to workbench
/// sessions.
pub const DEFAULT_TOKEN_PATH: &str = "/tmp/jwt";

#[derive(Debug, Deserialize)]
struct TokenFile {
    access_token: Option<String>,
}

/// Read the bearer credential from a JSON file with an `access_token`
/// field.
///
/// # Errors
///
/// Returns [`ClientError::Token`] when the file is missing, is not valid
/// JSON, or carries no non-empty `access_token`.
pub fn read_access_token(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|err| ClientError::Token {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    let parsed: TokenFile = serde_json::from_str(&raw).map_err(|err| ClientError::Token {
        path: path.to_path_buf(),
        reason: format!("invalid JSON: {err}"),
    })?;

    parsed
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ClientError::Token {
            path: path.to_path_buf(),
            reason: "missing access_token field".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn token_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_access_token() {
        let file = token_file(r#"{"access_token": "abc123", "expires_in": 3600}"#);

        let token = read_access_token(file.path()).unwrap();

        assert_eq!(token, "abc123");
    }

    #[test]
    fn rejects_missing_field() {
        let file = token_file(r#"{"refresh_token": "nope"}"#);

        let err = read_access_token(file.path()).unwrap_err();

        assert!(matches!(
            err,
            ClientError::Token { ref reason, .. } if reason.contains("missing access_token")
        ));
    }

    #[test]
    fn rejects_empty_token() {
        let file = token_file(r#"{"access_token": ""}"#);

        assert!(read_access_token(file.path()).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let file = token_file("not json at all");

        let err = read_access_token(file.path()).unwrap_err();

        assert!(matches!(
            err,
            ClientError::Token { ref reason, .. } if reason.contains("invalid JSON")
        ));
    }

    #[test]
    fn rejects_missing_file() {
        assert!(read_access_token("/nowhere/jwt").is_err());
    }
}

//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `IOMS_API_BASE_URL` - Base URL of the REST backend (e.g. `https://ioms.example.com`)
//!
//! ## Optional
//! - `IOMS_SESSION_PATH` - Where the session record is persisted (default: `.ioms/session.json`)
//! - `IOMS_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_SESSION_PATH: &str = ".ioms/session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: Url,
    /// File holding the persisted session record
    pub session_path: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("IOMS_API_BASE_URL", base_url)?,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("IOMS_API_BASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("IOMS_API_BASE_URL".to_string()))?;
        let base_url = parse_base_url("IOMS_API_BASE_URL", &raw_url)?;

        let session_path = lookup("IOMS_SESSION_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH), PathBuf::from);

        let timeout = match lookup("IOMS_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("IOMS_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            session_path,
            timeout: Duration::from_secs(timeout),
        })
    }

    /// Absolute URL for an API path such as `/products/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_base_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "IOMS_API_BASE_URL"));
    }

    #[test]
    fn test_defaults_and_endpoint_join() {
        let config =
            ClientConfig::from_lookup(lookup(&[("IOMS_API_BASE_URL", "http://localhost:8000/")]))
                .unwrap();
        assert_eq!(config.session_path, PathBuf::from(".ioms/session.json"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.endpoint("/products/"),
            "http://localhost:8000/products/"
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err =
            ClientConfig::from_lookup(lookup(&[("IOMS_API_BASE_URL", "ftp://files.example")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("IOMS_API_BASE_URL", "https://api.example"),
            ("IOMS_HTTP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref v, _) if v == "IOMS_HTTP_TIMEOUT_SECS"));
    }
}

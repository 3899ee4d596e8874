//! Logging and error-tracking settings for the CLI process.
//!
//! Backend settings live in [`ioms_client::ClientConfig`]; this only covers
//! what `main` needs before a client exists.

/// Telemetry configuration loaded from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Sentry DSN. Error tracking is off when unset.
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    /// Emit JSON log lines instead of text.
    pub log_json: bool,
}

impl TelemetryConfig {
    /// Load from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve each variable.
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            log_json: lookup("IOMS_LOG_JSON").is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TelemetryConfig::from_lookup(lookup(&[])), TelemetryConfig::default());
    }

    #[test]
    fn test_reads_sentry_and_log_format() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_ENVIRONMENT", "staging"),
            ("IOMS_LOG_JSON", ""),
        ]));
        assert_eq!(config.sentry_dsn.as_deref(), Some("https://key@sentry.example/1"));
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
        assert!(config.log_json);
    }

    #[test]
    fn test_blank_dsn_disables_sentry() {
        let config = TelemetryConfig::from_lookup(lookup(&[("SENTRY_DSN", "  ")]));
        assert!(config.sentry_dsn.is_none());
        assert!(!config.log_json);
    }
}

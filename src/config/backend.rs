//! Community backend configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::HttpBackendConfig;

/// Upper bound for `max_retries`.
const MAX_RETRIES_LIMIT: u32 = 10;

/// Which community backend to talk to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// Seeded in-process backend (demo and tests)
    #[default]
    InMemory,
    /// Remote community service over HTTP
    Http,
}

/// Community backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,

    /// Service root, required in HTTP mode
    pub base_url: Option<String>,

    /// Bearer token for the service
    pub api_token: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// First retry delay in milliseconds
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
}

impl BackendConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_http(&self) -> bool {
        self.mode == BackendMode::Http
    }

    /// Settings for the HTTP adapter, or `None` without a base URL.
    pub fn http_config(&self) -> Option<HttpBackendConfig> {
        let base_url = self.base_url.as_deref()?;
        let mut http = HttpBackendConfig::new(base_url)
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries)
            .with_retry_base_delay(Duration::from_millis(self.retry_base_delay_ms));
        if let Some(token) = &self.api_token {
            http = http.with_api_token(token.clone());
        }
        Some(http)
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_http() {
            let url = self
                .base_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("BACKEND__BASE_URL"))?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidBackendUrl);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ValidationError::TooManyRetries);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: None,
            api_token: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_base_delay_ms: default_retry_base_delay(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    250
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(url: &str) -> BackendConfig {
        BackendConfig {
            mode: BackendMode::Http,
            base_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_backend_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.mode, BackendMode::InMemory);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_mode_requires_url() {
        let config = BackendConfig {
            mode: BackendMode::Http,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("BACKEND__BASE_URL"))
        );
    }

    #[test]
    fn test_http_url_scheme() {
        assert_eq!(
            http("ftp://api.aquaveda.org").validate(),
            Err(ValidationError::InvalidBackendUrl)
        );
        assert!(http("https://api.aquaveda.org").validate().is_ok());
    }

    #[test]
    fn test_retry_and_timeout_bounds() {
        let mut config = http("https://api.aquaveda.org");
        config.max_retries = 11;
        assert_eq!(config.validate(), Err(ValidationError::TooManyRetries));

        config.max_retries = 2;
        config.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_http_config_conversion() {
        let mut config = http("https://api.aquaveda.org/");
        config.timeout_secs = 5;
        config.retry_base_delay_ms = 100;

        let http = config.http_config().unwrap();
        assert_eq!(http.base_url, "https://api.aquaveda.org");
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.retry_base_delay, Duration::from_millis(100));
        assert!(BackendConfig::default().http_config().is_none());
    }

    #[test]
    fn test_mode_deserialization() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"mode": "http", "base_url": "http://localhost:8080"}"#).unwrap();
        assert!(config.is_http());
    }
}

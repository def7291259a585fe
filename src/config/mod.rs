//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AQUAVEDA_` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields the in-memory demo.
//!
//! # Example
//!
//! ```no_run
//! use aquaveda::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend mode: {:?}", config.backend.mode);
//! ```

mod backend;
mod error;
mod features;
mod logging;
mod session;

pub use backend::{BackendConfig, BackendMode};
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::{LogFormat, LoggingConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Community backend (in-memory or HTTP)
    #[serde(default)]
    pub backend: BackendConfig,

    /// Signed-in user
    #[serde(default)]
    pub session: SessionConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AQUAVEDA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AQUAVEDA__BACKEND__MODE=http` -> `backend.mode = http`
    /// - `AQUAVEDA__FEATURES__ALLOW_ANSWER_WITHDRAWAL=true` -> `features.allow_answer_withdrawal = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AQUAVEDA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.backend.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

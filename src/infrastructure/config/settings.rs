//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the API key is only ever read
//! from the `CMC_API_KEY` environment variable (a `.env` file is honoured).
//!
//! # Example
//!
//! ```no_run
//! use exchange_feed::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```
//!
//! # File layout
//!
//! ```toml
//! [api]
//! base_url = "https://pro-api.coinmarketcap.com/v1"
//! timeout_ms = 30000
//! connect_timeout_ms = 30000
//!
//! [fetch]
//! page_size = 20
//! detail_timeout_ms = 10000
//!
//! [cache]
//! database = "exchanges.db"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use crate::adapter::outbound::coinmarketcap::CoinMarketCapConfig;
use crate::application::FetchConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CMC_API_KEY";

/// API key wrapper that keeps the secret out of `Debug` output.
#[derive(Clone, Default)]
struct ApiKey(String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Main application configuration.
///
/// Every section is optional; missing values take their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: CoinMarketCapConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Never read from the file.
    #[serde(skip)]
    api_key: Option<ApiKey>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Reads the API key from `CMC_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok();
        Self::parse_toml_with_key(content, api_key)
    }

    /// Parse configuration with an explicitly supplied API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_key(content: &str, api_key: Option<String>) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .map(ApiKey);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// A `.env` file in the working directory is loaded first, so it can
    /// supply `CMC_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// The API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when no key was provided.
    #[allow(clippy::result_large_err)]
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_ref().map(|key| key.0.as_str()).ok_or_else(|| {
            ConfigError::MissingField {
                field: API_KEY_ENV,
            }
            .into()
        })
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if let Err(e) = Url::parse(&self.api.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.fetch.validate()?;
        if self.cache.database.is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

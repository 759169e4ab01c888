//! CoinMarketCap API settings (`[api]` section).

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com/v1";

/// Connection settings for the CoinMarketCap REST API.
///
/// The API key is deliberately absent: it is read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinMarketCapConfig {
    /// Versioned API root, e.g. `https://pro-api.coinmarketcap.com/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    30_000
}

impl Default for CoinMarketCapConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

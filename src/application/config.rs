//! Fetch pipeline configuration (`[fetch]` section).

use std::time::Duration;

use serde::Deserialize;

use crate::domain::DEFAULT_PAGE_SIZE;
use crate::error::{ConfigError, Result};

/// Largest page the listing endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 5000;

/// Configuration for the exchange fetch pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Exchanges requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Upper bound for a single detail fetch, in milliseconds.
    #[serde(default = "default_detail_timeout_ms")]
    pub detail_timeout_ms: u64,
}

impl FetchConfig {
    #[must_use]
    pub const fn detail_timeout(&self) -> Duration {
        Duration::from_millis(self.detail_timeout_ms)
    }

    /// Check ranges.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an out-of-range field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}"),
            }
            .into());
        }
        if self.detail_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "detail_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            detail_timeout_ms: default_detail_timeout_ms(),
        }
    }
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_detail_timeout_ms() -> u64 {
    10_000
}

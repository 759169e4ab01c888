//! Local cache configuration (`[cache]` section).

use serde::Deserialize;

/// Where the exchange cache lives.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// SQLite database path, or `:memory:` for a process-local cache.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "exchanges.db".into()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

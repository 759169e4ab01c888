//! Infrastructure configuration modules.

pub mod cache;
pub mod logging;
pub mod settings;

pub use cache::CacheConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use settings::{Config, API_KEY_ENV};

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::ExchangeId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// HTTP or network failure. `status` is the HTTP status, or the API's
    /// in-body error code; `None` when no response was received.
    #[error("transport error (status {}): {message}", display_status(.status))]
    Transport { status: Option<u16>, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("exchange not found with ID: {id}")]
    NotFound { id: ExchangeId },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("cache write failed: {0}")]
    CacheWrite(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// HTTP status (or in-body API code) carried by a transport failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Error::Timeout;
        }
        Error::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

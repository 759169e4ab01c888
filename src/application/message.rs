//! Failure categories shown to callers.
//!
//! Transport failures are classified by HTTP status, or by the API's
//! in-body error code. The text is what a caller renders next to its retry
//! action.

use std::fmt;

use crate::error::Error;

/// In-body code the API uses for an exhausted rate limit.
pub const RATE_LIMIT_CODE: u16 = 1008;

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 401: the API key was rejected.
    SessionExpired,
    /// 404
    NotFound,
    /// 429
    TooManyRequests,
    /// 500
    ServerError,
    /// In-body code 1008.
    RateLimited,
    /// No response was received.
    Network,
    /// Anything else, with the status when there was one.
    Unexpected { code: Option<u16> },
}

impl FailureKind {
    #[must_use]
    pub const fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(401) => Self::SessionExpired,
            Some(404) => Self::NotFound,
            Some(429) => Self::TooManyRequests,
            Some(500) => Self::ServerError,
            Some(RATE_LIMIT_CODE) => Self::RateLimited,
            None => Self::Network,
            Some(code) => Self::Unexpected { code: Some(code) },
        }
    }

    #[must_use]
    pub const fn from_error(err: &Error) -> Self {
        match err {
            Error::Transport { status, .. } => Self::from_status(*status),
            Error::Timeout => Self::Network,
            Error::NotFound { .. } => Self::NotFound,
            _ => Self::Unexpected { code: None },
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionExpired => write!(f, "Session expired. Please check your API key."),
            Self::NotFound => write!(f, "The requested resource was not found."),
            Self::TooManyRequests => write!(f, "Too many requests. Please try again later."),
            Self::ServerError => write!(f, "Server error. Please try again later."),
            Self::RateLimited => write!(f, "API rate limit reached. Please try again later."),
            Self::Network => write!(f, "Unable to reach the server. Check your connection."),
            Self::Unexpected { code: Some(code) } => write!(f, "Unexpected error (code {code})."),
            Self::Unexpected { code: None } => write!(f, "Unexpected error."),
        }
    }
}

/// Message for a failed request.
///
/// A missing exchange names the id; everything else uses its category.
#[must_use]
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::NotFound { id } => format!("Exchange not found with ID: {id}"),
        other => FailureKind::from_error(other).to_string(),
    }
}

//! Tagged results emitted to callers.

use crate::domain::Exchange;

/// One emission of a load operation.
///
/// A request yields `Loading` first, then zero or one interim cached
/// `Success`, then exactly one terminal `Success` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Success {
        data: T,
        /// True when `data` was served from the local cache.
        from_cache: bool,
    },
    Error {
        message: String,
    },
}

impl<T> LoadState<T> {
    pub fn fresh(data: T) -> Self {
        Self::Success {
            data,
            from_cache: false,
        }
    }

    pub fn cached(data: T) -> Self {
        Self::Success {
            data,
            from_cache: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The payload of a success, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The message of an error, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_from_cache(&self) -> bool {
        matches!(self, Self::Success { from_cache: true, .. })
    }
}

/// One page of merged exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangePage {
    /// 1-based page number that was requested.
    pub page: u32,
    pub exchanges: Vec<Exchange>,
    /// True when the listing returned a full page, so another may follow.
    /// Always false for cache fallbacks.
    pub has_more: bool,
}

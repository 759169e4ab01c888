//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exchange identifier - newtype for type safety.
///
/// The upstream API identifies exchanges by integer; the merged display
/// entity and the cache key both use its decimal string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExchangeId(String);

impl ExchangeId {
    /// Create a new `ExchangeId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the exchange ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExchangeId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ExchangeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for ExchangeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

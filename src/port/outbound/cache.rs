//! Local cache port: a persisted snapshot of the last successful page.

use async_trait::async_trait;

use crate::domain::Exchange;
use crate::error::Result;

/// Persistent store of merged exchanges keyed by exchange id.
///
/// The cache is the only shared mutable resource in the core. Writers are
/// serialized; a reader running concurrently with
/// [`atomic_replace_all`](LocalCache::atomic_replace_all) observes either the
/// complete old set or the complete new set, never a partial or empty
/// intermediate state.
#[async_trait]
pub trait LocalCache: Send + Sync {
    /// Read every cached exchange.
    ///
    /// Never fails: storage errors degrade to an empty result.
    async fn read_all(&self) -> Vec<Exchange>;

    /// Replace the entire stored set in one transaction.
    async fn atomic_replace_all(&self, entries: &[Exchange]) -> Result<()>;

    /// Remove every cached exchange.
    async fn clear(&self) -> Result<()>;
}

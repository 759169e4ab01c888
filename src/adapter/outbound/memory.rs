//! In-memory exchange cache.
//!
//! Holds the cached set behind an `Arc` that is swapped in one step, so a
//! reader always clones either the previous set or the new one.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::Exchange;
use crate::error::Result;
use crate::port::outbound::LocalCache;

/// Process-local [`LocalCache`]. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryExchangeCache {
    entries: RwLock<Arc<Vec<Exchange>>>,
}

impl MemoryExchangeCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that starts with the given contents.
    pub fn with_entries(entries: Vec<Exchange>) -> Self {
        Self {
            entries: RwLock::new(Arc::new(entries)),
        }
    }

    /// Cheap snapshot of the current set.
    pub fn snapshot(&self) -> Arc<Vec<Exchange>> {
        Arc::clone(&self.entries.read())
    }
}

#[async_trait]
impl LocalCache for MemoryExchangeCache {
    async fn read_all(&self) -> Vec<Exchange> {
        self.snapshot().as_ref().clone()
    }

    async fn atomic_replace_all(&self, entries: &[Exchange]) -> Result<()> {
        // Build outside the lock; the write only swaps the pointer.
        let next = Arc::new(entries.to_vec());
        *self.entries.write() = next;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.entries.write() = Arc::default();
        Ok(())
    }
}

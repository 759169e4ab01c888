//! Scripted [`LocalCache`] for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;

use crate::adapter::outbound::memory::MemoryExchangeCache;
use crate::domain::Exchange;
use crate::error::{Error, Result};
use crate::port::outbound::LocalCache;

/// In-memory cache that counts writes and can be told to reject them.
#[derive(Debug, Default)]
pub struct ScriptedCache {
    inner: MemoryExchangeCache,
    fail_writes: AtomicBool,
    writes: AtomicU32,
}

impl ScriptedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Exchange>) -> Self {
        Self {
            inner: MemoryExchangeCache::with_entries(entries),
            ..Self::default()
        }
    }

    /// Make every subsequent replace fail.
    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Replace attempts, failed ones included.
    pub fn writes(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocalCache for ScriptedCache {
    async fn read_all(&self) -> Vec<Exchange> {
        self.inner.read_all().await
    }

    async fn atomic_replace_all(&self, entries: &[Exchange]) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::CacheWrite("disk full".to_string()));
        }
        self.inner.atomic_replace_all(entries).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }
}

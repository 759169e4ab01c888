//! Concurrent detail enrichment.
//!
//! Every stub gets its own task with its own timeout. A failed, timed-out,
//! or cancelled fetch degrades that one entry to its stub fields and never
//! touches its siblings. The batch returns only after every task resolved.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, warn};

use super::cancel::CancelToken;
use crate::domain::{Exchange, ExchangeDetail, ExchangeStub};
use crate::port::outbound::RemoteSource;

/// Default bound for a single detail fetch.
pub const DEFAULT_DETAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Fans out detail fetches and merges the results.
#[derive(Clone)]
pub struct DetailFetchOrchestrator {
    remote: Arc<dyn RemoteSource>,
    timeout: Duration,
}

impl DetailFetchOrchestrator {
    pub fn new(remote: Arc<dyn RemoteSource>, timeout: Duration) -> Self {
        Self { remote, timeout }
    }

    /// Fetch details for every stub and merge them.
    ///
    /// Output has one entry per input stub, in input order.
    pub async fn fetch_all(&self, stubs: &[ExchangeStub], cancel: &CancelToken) -> Vec<Exchange> {
        let tasks: Vec<_> = stubs
            .iter()
            .cloned()
            .map(|stub| {
                let remote = Arc::clone(&self.remote);
                let cancel = cancel.clone();
                let timeout = self.timeout;
                tokio::spawn(async move {
                    let detail = fetch_one(remote.as_ref(), stub.id, timeout, &cancel).await;
                    Exchange::merge(&stub, detail.as_ref())
                })
            })
            .collect();

        let results = join_all(tasks).await;

        let degraded = results.iter().filter(|r| r.is_err()).count();
        if degraded > 0 {
            warn!(degraded, "Detail tasks aborted, using degraded entries");
        }

        results
            .into_iter()
            .zip(stubs)
            .map(|(result, stub)| result.unwrap_or_else(|_| Exchange::degraded(stub)))
            .collect()
    }
}

async fn fetch_one(
    remote: &dyn RemoteSource,
    id: u64,
    timeout: Duration,
    cancel: &CancelToken,
) -> Option<ExchangeDetail> {
    tokio::select! {
        biased;

        () = cancel.cancelled() => {
            debug!(id, "Detail fetch cancelled");
            None
        }

        result = tokio::time::timeout(timeout, remote.exchange_detail(id)) => match result {
            Ok(Ok(detail)) => Some(detail),
            Ok(Err(e)) => {
                debug!(id, source = remote.source_name(), error = %e, "Detail fetch failed, using degraded entry");
                None
            }
            Err(_) => {
                warn!(
                    id,
                    timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    "Detail fetch timed out, using degraded entry"
                );
                None
            }
        },
    }
}

//! Page request pipeline.
//!
//! One call to [`ExchangeAggregator::exchanges_with_details`] runs, in order:
//!
//! 1. emit `Loading`
//! 2. list the page remotely (on failure: serve the cache, or emit `Error`)
//! 3. emit the existing cache contents as an interim result, if any
//! 4. fetch every detail concurrently, degrading failures per entry
//! 5. drop repeated ids, keeping the first
//! 6. replace the cache in one transaction
//! 7. emit the fresh result
//!
//! Only the latest call is live. Starting a new one cancels the previous
//! call's remaining work, including its pending detail fetches, and a
//! cancelled call never writes the cache after observing cancellation.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tracing::{debug, info, warn};

use super::cancel::{CancelToken, Canceller};
use super::config::FetchConfig;
use super::detail::DetailFetchOrchestrator;
use super::feed::ExchangeFeed;
use super::message::failure_message;
use super::state::{ExchangePage, LoadState};
use crate::domain::{dedup_by_id, Exchange, Page};
use crate::error::Error;
use crate::port::outbound::{LocalCache, RemoteSource};

/// Emissions buffered per feed: loading, interim, terminal.
const FEED_CAPACITY: usize = 4;

type Sender = mpsc::Sender<LoadState<ExchangePage>>;

/// Coordinates remote listing, detail enrichment and the local cache.
pub struct ExchangeAggregator {
    pipeline: Pipeline,
    in_flight: Mutex<Option<Canceller>>,
}

/// Everything one request needs; cloned into its task.
#[derive(Clone)]
struct Pipeline {
    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn LocalCache>,
    details: DetailFetchOrchestrator,
    page_size: u32,
    /// Serializes cache replacement across requests.
    write_lock: Arc<AsyncMutex<()>>,
}

impl ExchangeAggregator {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        cache: Arc<dyn LocalCache>,
        config: &FetchConfig,
    ) -> Self {
        let details = DetailFetchOrchestrator::new(Arc::clone(&remote), config.detail_timeout());
        Self {
            pipeline: Pipeline {
                remote,
                cache,
                details,
                page_size: config.page_size,
                write_lock: Arc::new(AsyncMutex::new(())),
            },
            in_flight: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.pipeline.page_size
    }

    /// Start loading `page` (1-based), superseding any request in flight.
    ///
    /// Must be called within a Tokio runtime. Dropping the returned feed
    /// stops the request at its next emission.
    pub fn exchanges_with_details(&self, page: u32) -> ExchangeFeed {
        let (canceller, token) = Canceller::new();
        if let Some(previous) = self.in_flight.lock().replace(canceller) {
            debug!(page, "Superseding in-flight exchange request");
            previous.cancel();
        }

        let (tx, rx) = mpsc::channel(FEED_CAPACITY);
        let pipeline = self.pipeline.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;

                () = token.cancelled() => {
                    debug!(page, "Exchange request cancelled");
                }

                () = pipeline.run(page, &tx, &token) => {}
            }
        });

        ExchangeFeed::new(rx)
    }

    /// Cancel the request in flight, if any. Its feed ends without a
    /// terminal state.
    pub fn cancel(&self) {
        if let Some(current) = self.in_flight.lock().take() {
            debug!("Cancelling in-flight exchange request");
            current.cancel();
        }
    }
}

impl Drop for ExchangeAggregator {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Send one emission; false once the feed was dropped.
async fn emit(tx: &Sender, state: LoadState<ExchangePage>) -> bool {
    tx.send(state).await.is_ok()
}

impl Pipeline {
    async fn run(&self, page_number: u32, tx: &Sender, token: &CancelToken) {
        if !emit(tx, LoadState::Loading).await {
            return;
        }

        let page = match Page::try_new(page_number, self.page_size) {
            Ok(page) => page,
            Err(e) => {
                warn!(page = page_number, error = %e, "Rejected page request");
                emit(tx, LoadState::error(Error::from(e).to_string())).await;
                return;
            }
        };

        let stubs = match self
            .remote
            .list_exchanges(page.offset(), page.size())
            .await
        {
            Ok(stubs) => stubs,
            Err(e) => {
                self.fall_back(page, &e, tx).await;
                return;
            }
        };
        let has_more = page.has_more(stubs.len());
        debug!(
            page = page.number(),
            count = stubs.len(),
            has_more,
            "Listed exchanges"
        );

        // Interim snapshot from the cache as it was before this refresh.
        let cached = self.cache.read_all().await;
        if !cached.is_empty() {
            let interim = ExchangePage {
                page: page.number(),
                exchanges: cached,
                has_more,
            };
            if !emit(tx, LoadState::cached(interim)).await {
                return;
            }
        }

        let merged = self.details.fetch_all(&stubs, token).await;
        let exchanges = dedup_by_id(merged);
        if exchanges.len() < stubs.len() {
            debug!(
                dropped = stubs.len() - exchanges.len(),
                "Dropped repeated exchange ids"
            );
        }

        if !self.replace_cache(&exchanges, token).await {
            return;
        }

        info!(
            page = page.number(),
            count = exchanges.len(),
            degraded = exchanges.iter().filter(|e| e.is_degraded()).count(),
            "Loaded exchanges"
        );
        emit(
            tx,
            LoadState::fresh(ExchangePage {
                page: page.number(),
                exchanges,
                has_more,
            }),
        )
        .await;
    }

    /// Serve the cache after a failed listing, or report the failure.
    async fn fall_back(&self, page: Page, err: &Error, tx: &Sender) {
        let cached = self.cache.read_all().await;
        if cached.is_empty() {
            warn!(
                page = page.number(),
                source = self.remote.source_name(),
                error = %err,
                "Exchange listing failed and cache is empty"
            );
            emit(tx, LoadState::error(failure_message(err))).await;
            return;
        }

        warn!(
            page = page.number(),
            source = self.remote.source_name(),
            error = %err,
            cached = cached.len(),
            "Exchange listing failed, serving cache"
        );
        emit(
            tx,
            LoadState::cached(ExchangePage {
                page: page.number(),
                exchanges: cached,
                has_more: false,
            }),
        )
        .await;
    }

    /// Replace the cache unless the request was cancelled.
    ///
    /// Returns false when cancelled. A write failure is logged and does not
    /// stop the fresh result from being emitted.
    async fn replace_cache(&self, exchanges: &[Exchange], token: &CancelToken) -> bool {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        if token.is_cancelled() {
            debug!("Request cancelled before cache write, skipping");
            return false;
        }

        // The write runs in its own task holding the lock, so a cancellation
        // arriving mid-write cannot release the lock before it commits.
        let cache = Arc::clone(&self.cache);
        let entries: Vec<Exchange> = exchanges.to_vec();
        let write = tokio::spawn(async move {
            let _guard = guard;
            cache.atomic_replace_all(&entries).await
        });

        match write.await {
            Ok(Ok(())) => debug!(count = exchanges.len(), "Cache replaced"),
            Ok(Err(e)) => warn!(error = %e, "Cache write failed, serving fresh data anyway"),
            Err(e) => warn!(error = %e, "Cache write task failed"),
        }
        true
    }
}

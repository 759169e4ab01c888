//! Single-exchange lookups: detail, held currencies, and both combined.
//!
//! These return terminal states only. There is no cache fallback; a failure
//! is reported with the same messages as the page pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use super::message::failure_message;
use super::state::LoadState;
use crate::domain::{rank_currencies, CurrencyQuote, ExchangeDetail, ExchangeId, ExchangeProfile};
use crate::error::{Error, Result};
use crate::port::outbound::RemoteSource;

/// Per-exchange queries against the remote source.
#[derive(Clone)]
pub struct ExchangeLookup {
    remote: Arc<dyn RemoteSource>,
}

impl ExchangeLookup {
    pub fn new(remote: Arc<dyn RemoteSource>) -> Self {
        Self { remote }
    }

    /// Detail record for one exchange.
    pub async fn detail(&self, id: &ExchangeId) -> LoadState<ExchangeDetail> {
        match self.fetch_detail(id).await {
            Ok(detail) => LoadState::fresh(detail),
            Err(e) => {
                warn!(id = %id, error = %e, "Exchange detail lookup failed");
                LoadState::error(failure_message(&e))
            }
        }
    }

    /// Currencies held by one exchange, each once, most valuable first.
    pub async fn currencies(&self, id: &ExchangeId) -> LoadState<Vec<CurrencyQuote>> {
        match self.fetch_currencies(id).await {
            Ok(quotes) => LoadState::fresh(quotes),
            Err(e) => {
                warn!(id = %id, error = %e, "Exchange currencies lookup failed");
                LoadState::error(failure_message(&e))
            }
        }
    }

    /// Detail and currencies fetched concurrently.
    ///
    /// A failed detail fails the profile; failed currencies only leave the
    /// currency list empty.
    pub async fn profile(&self, id: &ExchangeId) -> LoadState<ExchangeProfile> {
        let (detail, currencies) = tokio::join!(self.fetch_detail(id), self.fetch_currencies(id));

        let detail = match detail {
            Ok(detail) => detail,
            Err(e) => {
                warn!(id = %id, error = %e, "Exchange profile lookup failed");
                return LoadState::error(failure_message(&e));
            }
        };
        let currencies = currencies.unwrap_or_else(|e| {
            debug!(id = %id, error = %e, "Currencies unavailable, profile without them");
            Vec::new()
        });

        LoadState::fresh(ExchangeProfile { detail, currencies })
    }

    async fn fetch_detail(&self, id: &ExchangeId) -> Result<ExchangeDetail> {
        self.remote.exchange_detail(upstream_id(id)?).await
    }

    async fn fetch_currencies(&self, id: &ExchangeId) -> Result<Vec<CurrencyQuote>> {
        let quotes = self.remote.exchange_assets(upstream_id(id)?).await?;
        Ok(rank_currencies(quotes))
    }
}

/// Upstream ids are integers; anything else cannot exist upstream.
fn upstream_id(id: &ExchangeId) -> Result<u64> {
    id.as_str()
        .parse()
        .map_err(|_| Error::NotFound { id: id.clone() })
}

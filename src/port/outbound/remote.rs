//! Remote source port: the two upstream calls the core depends on.

use async_trait::async_trait;

use crate::domain::{CurrencyQuote, ExchangeDetail, ExchangeStub};
use crate::error::Result;

/// Upstream exchange directory.
///
/// Pure I/O boundary. Failures surface as
/// [`Error::Transport`](crate::error::Error::Transport) on non-2xx responses
/// or network failure. Fields missing from an upstream payload must map to
/// `None`, never to an invented default.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// List exchange stubs starting at the 1-based `offset`.
    async fn list_exchanges(&self, offset: u64, limit: u32) -> Result<Vec<ExchangeStub>>;

    /// Fetch the detail record for one exchange.
    ///
    /// Returns [`Error::NotFound`](crate::error::Error::NotFound) when the
    /// upstream response does not contain the requested id.
    async fn exchange_detail(&self, id: u64) -> Result<ExchangeDetail>;

    /// Fetch the currencies an exchange holds.
    async fn exchange_assets(&self, id: u64) -> Result<Vec<CurrencyQuote>>;

    /// Get the source name for logging/debugging.
    fn source_name(&self) -> &'static str;
}

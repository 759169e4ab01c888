//! Exchange-agnostic domain types.
//!
//! Nothing here performs I/O; adapters convert their wire and storage
//! formats into these types.

pub mod currency;
pub mod error;
pub mod exchange;
pub mod id;
pub mod page;

pub use currency::{rank_currencies, CurrencyQuote, ExchangeProfile};
pub use error::DomainError;
pub use exchange::{dedup_by_id, Exchange, ExchangeDetail, ExchangeStub};
pub use id::ExchangeId;
pub use page::{Page, DEFAULT_PAGE_SIZE};

//! Application services (use cases).
//!
//! These services sequence the ports: the page pipeline with its detail
//! fan-out, and single-exchange lookups.

pub mod aggregator;
pub mod cancel;
pub mod config;
pub mod detail;
pub mod feed;
pub mod lookup;
pub mod message;
pub mod state;

pub use aggregator::ExchangeAggregator;
pub use cancel::{CancelToken, Canceller};
pub use config::FetchConfig;
pub use detail::{DetailFetchOrchestrator, DEFAULT_DETAIL_TIMEOUT};
pub use feed::ExchangeFeed;
pub use lookup::ExchangeLookup;
pub use message::{failure_message, FailureKind};
pub use state::{ExchangePage, LoadState};

//! Exchange feed - paginated crypto exchange listings with a local cache.
//!
//! Fetches a page of exchanges from a remote directory, enriches every entry
//! with a concurrently fetched detail record, and keeps a local cache that
//! serves as a fallback when the remote is unavailable.
//!
//! # Architecture
//!
//! The crate is laid out as ports and adapters:
//!
//! - [`domain`] - Exchange-agnostic types: stubs, details, merged exchanges, pages
//! - [`port`] - The consumed interfaces: [`RemoteSource`](port::RemoteSource)
//!   and [`LocalCache`](port::LocalCache)
//! - [`adapter`] - CoinMarketCap over HTTP, SQLite and in-memory caches
//! - [`application`] - The page pipeline, detail fan-out, and lookups
//! - [`infrastructure`] - Configuration, logging, and service wiring
//! - [`error`] - Error types for the crate
//!
//! # Guarantees
//!
//! - A failed or slow detail fetch degrades only its own entry.
//! - The cache is replaced in one transaction; readers never see it empty
//!   or half-written during a refresh.
//! - Starting a page request cancels the one in flight.
//!
//! # Example
//!
//! ```no_run
//! use exchange_feed::application::LoadState;
//! use exchange_feed::infrastructure::bootstrap::build_services;
//! use exchange_feed::infrastructure::config::Config;
//!
//! # async fn run() -> exchange_feed::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! config.init_logging();
//! let services = build_services(&config)?;
//!
//! let mut feed = services.aggregator.exchanges_with_details(1);
//! while let Some(state) = feed.next().await {
//!     match state {
//!         LoadState::Loading => println!("loading"),
//!         LoadState::Success { data, from_cache } => {
//!             println!("{} exchanges (cached: {from_cache})", data.exchanges.len());
//!         }
//!         LoadState::Error { message } => eprintln!("{message}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

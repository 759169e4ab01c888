//! CoinMarketCap adapter.
//!
//! Implements [`RemoteSource`](crate::port::outbound::RemoteSource) over the
//! CoinMarketCap Pro REST API.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::CoinMarketCapClient;
pub use settings::CoinMarketCapConfig;

//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod cache;
pub mod remote;

pub use cache::LocalCache;
pub use remote::RemoteSource;

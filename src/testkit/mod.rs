//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`remote`] - `ScriptedRemote`, a [`RemoteSource`](crate::port::outbound::RemoteSource)
//!   with per-call and per-id scripted behavior and call counters.
//! - [`cache`] - `ScriptedCache`, an in-memory cache whose writes can be
//!   made to fail.
//! - [`domain`] - Builders for stubs, details, exchanges and quotes.

pub mod cache;
pub mod domain;
pub mod remote;

//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  aggregator, orchestrator│
//!                 └────────────┬─────────────┘
//!                  ┌───────────┴───────────┐
//!                  ▼                       ▼
//!           ┌─────────────┐         ┌─────────────┐
//!           │RemoteSource │         │ LocalCache  │
//!           │  (HTTP)     │         │  (SQLite)   │
//!           └─────────────┘         └─────────────┘
//! ```

pub mod outbound;

pub use outbound::cache::LocalCache;
pub use outbound::remote::RemoteSource;

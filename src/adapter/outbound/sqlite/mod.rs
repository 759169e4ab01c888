//! SQLite persistence adapter.
//!
//! Provides the on-disk exchange cache using Diesel ORM with embedded
//! migrations.

pub mod cache;
pub mod database;

pub use cache::SqliteExchangeCache;
pub use database::{create_pool, run_migrations, DbPool};

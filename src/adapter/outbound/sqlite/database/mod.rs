//! SQLite database modules.
//!
//! Provides database connection management, schema definitions, and
//! Diesel model types for the exchange cache.

pub mod connection;
pub mod model;
pub mod schema;

pub use connection::{create_pool, run_migrations, DbPool};

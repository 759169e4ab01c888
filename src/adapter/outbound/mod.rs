//! Outbound adapters (driven side).

pub mod coinmarketcap;
pub mod memory;
pub mod sqlite;

//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and per-connection
//! pragmas for the SQLite exchange cache.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const MEMORY_DATABASE: &str = ":memory:";

/// Sets `busy_timeout` on every connection the pool opens.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA busy_timeout=5000")
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// Every SQLite connection to `:memory:` opens its own private database, so
/// in-memory pools hold exactly one connection that is never recycled.
/// File databases are switched to WAL so readers keep seeing the last
/// committed snapshot while a replace is in progress.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let in_memory = database_url == MEMORY_DATABASE;

    let builder = Pool::builder().connection_customizer(Box::new(SqlitePragmas));
    let builder = if in_memory {
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder.max_size(5)
    };
    let pool = builder
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))?;

    if !in_memory {
        let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        diesel::sql_query("PRAGMA journal_mode=WAL")
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
    }

    debug!(database = database_url, in_memory, "SQLite pool created");
    Ok(pool)
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Connection(e.to_string()))?;
    Ok(())
}

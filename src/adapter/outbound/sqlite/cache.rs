//! SQLite exchange cache.
//!
//! The whole cached set is replaced inside one `BEGIN IMMEDIATE`
//! transaction. With the WAL journal a concurrent reader keeps seeing the
//! previous commit until the replacing transaction commits, so the table is
//! never observed empty or half-written.

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::{debug, warn};

use super::database::model::ExchangeRow;
use super::database::schema::exchanges;
use super::database::DbPool;
use crate::domain::Exchange;
use crate::error::{Error, Result};
use crate::port::outbound::LocalCache;

/// SQLite-backed [`LocalCache`].
#[derive(Clone)]
pub struct SqliteExchangeCache {
    pool: DbPool,
}

impl SqliteExchangeCache {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn load_rows(pool: &DbPool) -> Result<Vec<ExchangeRow>> {
        let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        exchanges::table
            .select(ExchangeRow::as_select())
            .order(exchanges::position.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn replace_rows(pool: &DbPool, rows: &[ExchangeRow]) -> Result<()> {
        let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        conn.immediate_transaction(|conn| {
            diesel::delete(exchanges::table).execute(conn)?;
            for row in rows {
                diesel::insert_into(exchanges::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok::<_, diesel::result::Error>(())
        })
        .map_err(|e| Error::CacheWrite(e.to_string()))
    }

    fn delete_rows(pool: &DbPool) -> Result<usize> {
        let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        diesel::delete(exchanges::table)
            .execute(&mut conn)
            .map_err(|e| Error::CacheWrite(e.to_string()))
    }

    /// Run blocking Diesel work off the async runtime.
    async fn blocking<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&DbPool) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || work(&pool))
            .await
            .map_err(|e| Error::Database(e.to_string()))?
    }
}

#[async_trait]
impl LocalCache for SqliteExchangeCache {
    async fn read_all(&self) -> Vec<Exchange> {
        match self.blocking(Self::load_rows).await {
            Ok(rows) => {
                debug!(count = rows.len(), "Read exchange cache");
                rows.into_iter().map(ExchangeRow::into_exchange).collect()
            }
            Err(e) => {
                warn!(error = %e, "Exchange cache read failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn atomic_replace_all(&self, entries: &[Exchange]) -> Result<()> {
        let rows = entries
            .iter()
            .enumerate()
            .map(|(position, exchange)| {
                let position = i32::try_from(position)
                    .map_err(|_| Error::CacheWrite("too many entries".into()))?;
                Ok(ExchangeRow::from_exchange(exchange, position))
            })
            .collect::<Result<Vec<_>>>()?;
        let count = rows.len();

        self.blocking(move |pool| Self::replace_rows(pool, &rows))
            .await?;
        debug!(count, "Replaced exchange cache");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let deleted = self.blocking(Self::delete_rows).await?;
        debug!(deleted, "Cleared exchange cache");
        Ok(())
    }
}

//! Composition root: builds the services from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::coinmarketcap::CoinMarketCapClient;
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteExchangeCache};
use crate::application::{ExchangeAggregator, ExchangeLookup};
use crate::error::Result;
use crate::infrastructure::config::{CacheConfig, Config};
use crate::port::outbound::{LocalCache, RemoteSource};

/// Wired application services sharing one remote source and one cache.
pub struct Services {
    pub aggregator: ExchangeAggregator,
    pub lookup: ExchangeLookup,
    pub cache: Arc<dyn LocalCache>,
}

/// Open (and migrate) the SQLite cache.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn build_cache(config: &CacheConfig) -> Result<Arc<SqliteExchangeCache>> {
    let pool = create_pool(&config.database)?;
    run_migrations(&pool)?;
    Ok(Arc::new(SqliteExchangeCache::new(pool)))
}

/// Build the HTTP remote source.
///
/// # Errors
/// Returns an error if the API key is missing or the client cannot be built.
pub fn build_remote(config: &Config) -> Result<Arc<CoinMarketCapClient>> {
    let client = CoinMarketCapClient::from_config(&config.api, config.api_key()?)?;
    Ok(Arc::new(client))
}

/// Build every service from configuration.
///
/// # Errors
/// Returns an error if the cache or the remote source cannot be built.
pub fn build_services(config: &Config) -> Result<Services> {
    let remote: Arc<dyn RemoteSource> = build_remote(config)?;
    let cache: Arc<dyn LocalCache> = build_cache(&config.cache)?;
    Ok(assemble(remote, cache, config))
}

/// Wire services around already-built adapters.
pub fn assemble(remote: Arc<dyn RemoteSource>, cache: Arc<dyn LocalCache>, config: &Config) -> Services {
    info!(
        source = remote.source_name(),
        database = %config.cache.database,
        page_size = config.fetch.page_size,
        detail_timeout_ms = config.fetch.detail_timeout_ms,
        "Exchange services ready"
    );
    Services {
        aggregator: ExchangeAggregator::new(Arc::clone(&remote), Arc::clone(&cache), &config.fetch),
        lookup: ExchangeLookup::new(remote),
        cache,
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use exchange_feed::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteExchangeCache};
use tempfile::TempDir;

/// SQLite cache backed by a file in a temporary directory.
///
/// The directory (database, WAL and shared-memory files) is removed on drop.
pub struct TempDb {
    dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("exchanges.db");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// Open a fresh pool on the database file and wrap it in a cache.
    pub fn open_cache(&self) -> Arc<SqliteExchangeCache> {
        let pool = create_pool(&self.url()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");
        Arc::new(SqliteExchangeCache::new(pool))
    }
}

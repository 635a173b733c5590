//! Connection pool - scoped SQLite connections
//!
//! Every store operation checks a connection out of the pool and hands it
//! back when the guard drops, including on early `?` returns.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;

use crate::Result;

/// A connection checked out of the pool
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Settings needed to reach the backing database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Database file (created if absent)
    pub path: PathBuf,
    /// Maximum number of open connections
    pub max_size: u32,
    /// How long a checkout waits for a free connection
    pub connection_timeout: Duration,
    /// How long SQLite retries on a locked database
    pub busy_timeout: Duration,
}

impl ConnectionSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(2),
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }
}

/// Pool of SQLite connections for one database
#[derive(Clone)]
pub struct ConnectionPool {
    inner: r2d2::Pool<SqliteConnectionManager>,
    location: String,
}

impl ConnectionPool {
    /// Open a pool over a database file
    pub fn open(settings: &ConnectionSettings) -> Result<Self> {
        let busy_timeout = settings.busy_timeout;
        let manager = SqliteConnectionManager::file(&settings.path)
            .with_init(move |conn| conn.busy_timeout(busy_timeout));

        let inner = r2d2::Pool::builder()
            .max_size(settings.max_size.max(1))
            .connection_timeout(settings.connection_timeout)
            .build(manager)?;

        Ok(Self {
            inner,
            location: settings.path.display().to_string(),
        })
    }

    /// Open a single-connection pool over a private in-memory database (for testing).
    ///
    /// Each SQLite in-memory connection is its own database, so the pool
    /// holds exactly one connection and never recycles it.
    pub fn open_in_memory() -> Result<Self> {
        let inner = r2d2::Pool::builder()
            .max_size(1)
            .max_lifetime(None)
            .idle_timeout(None)
            .build(SqliteConnectionManager::memory())?;

        Ok(Self {
            inner,
            location: ":memory:".to_string(),
        })
    }

    /// Check out a connection; it returns to the pool when dropped
    pub fn get(&self) -> Result<PooledConnection> {
        Ok(self.inner.get()?)
    }

    /// Where the pool's database lives, for log and display output
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Connections currently open, checked out or idle
    pub fn open_connections(&self) -> u32 {
        self.inner.state().connections
    }

    /// Connections open and not checked out
    pub fn idle_connections(&self) -> u32 {
        self.inner.state().idle_connections
    }
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("location", &self.location)
            .field("connections", &self.open_connections())
            .finish()
    }
}

/// Whether `path` points at an existing database file
pub fn database_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_connection_returns_to_pool_on_drop() {
        let dir = TempDir::new().unwrap();
        let settings = ConnectionSettings::new(dir.path().join("pool.db")).with_max_size(2);
        let pool = ConnectionPool::open(&settings).unwrap();

        let idle_before = pool.idle_connections();
        {
            let conn = pool.get().unwrap();
            conn.execute_batch("CREATE TABLE t (x INT)").unwrap();
            assert_eq!(pool.idle_connections(), idle_before - 1);
        }
        assert_eq!(pool.idle_connections(), idle_before);
    }

    #[test]
    fn test_connection_returns_after_failed_statement() {
        let pool = ConnectionPool::open_in_memory().unwrap();

        let failed = (|| -> Result<()> {
            let conn = pool.get()?;
            conn.execute("INSERT INTO missing_table VALUES (1)", [])?;
            Ok(())
        })();

        assert!(failed.is_err());
        assert_eq!(pool.idle_connections(), 1);
        assert!(pool.get().is_ok());
    }

    #[test]
    fn test_file_is_created_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.db");
        assert!(!database_exists(&path));

        ConnectionPool::open(&ConnectionSettings::new(&path)).unwrap();
        assert!(database_exists(&path));
    }

    #[test]
    fn test_unreachable_path_is_connectivity_error() {
        let dir = TempDir::new().unwrap();
        let settings = ConnectionSettings {
            connection_timeout: Duration::from_millis(200),
            ..ConnectionSettings::new(dir.path().join("no").join("such").join("dir.db"))
        };

        let err = ConnectionPool::open(&settings).unwrap_err();
        assert!(err.is_connectivity());
    }

    #[test]
    fn test_max_size_is_at_least_one() {
        let settings = ConnectionSettings::new("x.db").with_max_size(0);
        assert_eq!(settings.max_size, 1);
    }
}

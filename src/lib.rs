//! # Jobstore - Durable Job Progression Storage
//!
//! Persists which jobs each player has joined, together with their
//! experience and level in each one.
//!
//! Jobstore provides:
//! - A SQLite-backed `ProgressionStore` with scoped, pooled connections
//! - Versioned schema migrations run on every open
//! - Aggregate membership counts for job capacity checks
//! - TOML configuration for the connectivity settings

pub mod membership;
pub mod storage;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use membership::{MembershipRecord, ProgressionUpdate};
pub use storage::{ConnectionPool, ConnectionSettings, JoinOutcome, ProgressionStore, StoreStats};
pub use config::StoreConfig;

/// Result type alias for Jobstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for storage operations.
///
/// Zero matching rows is never an error; every variant here means the
/// backing store could not do what was asked.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Migration {version} failed: {source}")]
    Migration {
        version: u32,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Statement error: {0}")]
    Statement(#[from] rusqlite::Error),

    #[error("Invalid level 0 for job {job}: levels start at 1")]
    InvalidLevel { job: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the store could not be reached or set up at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity(_) | Error::Migration { .. })
    }
}

impl From<r2d2::Error> for Error {
    fn from(err: r2d2::Error) -> Self {
        Error::Connectivity(err.to_string())
    }
}

//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with a single table:
//! - jobs(username, experience, level, job)
//!
//! One row per membership, with no key or uniqueness constraint.

pub mod pool;
pub mod schema;
pub mod sqlite;

pub use pool::{ConnectionPool, ConnectionSettings, PooledConnection};
pub use sqlite::{JoinOutcome, ProgressionStore, StoreStats};

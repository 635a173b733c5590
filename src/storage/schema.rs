//! Database schema definitions and migrations

use rusqlite::Connection;

use crate::{Error, Result};

/// SQL to create the jobs table.
///
/// No primary key and no uniqueness on (username, job): callers keep at
/// most one row per pair.
pub const CREATE_JOBS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    username VARCHAR(20),
    experience INT,
    level INT,
    job VARCHAR(20)
)
"#;

/// SQL to create lookup indexes (non-unique)
pub const CREATE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_jobs_username ON jobs(username);
CREATE INDEX IF NOT EXISTS idx_jobs_job ON jobs(job);
"#;

/// Ordered migrations; entry N brings the schema to version N + 1.
const MIGRATIONS: [&str; 2] = [CREATE_JOBS_TABLE, CREATE_INDEXES];

pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Read the schema version recorded in the database
pub fn current_version(conn: &Connection) -> Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(|source| Error::Migration { version: 0, source })
}

/// Apply every migration newer than the recorded version.
///
/// Returns how many migrations ran. Safe to call on every startup.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (idx, sql) in MIGRATIONS.iter().enumerate() {
        let target = (idx + 1) as u32;
        if current >= target {
            continue;
        }

        conn.execute_batch(sql)
            .map_err(|source| Error::Migration { version: target, source })?;
        conn.pragma_update(None, "user_version", target)
            .map_err(|source| Error::Migration { version: target, source })?;

        tracing::debug!(version = target, "applied schema migration");
        applied += 1;
    }

    Ok(applied)
}

//! SQLite storage implementation

use std::path::Path;
use rusqlite::params;
use crate::{Error, Result};
use crate::membership::{MembershipRecord, ProgressionUpdate, STARTING_EXPERIENCE, STARTING_LEVEL};
use super::pool::{ConnectionPool, ConnectionSettings};
use super::schema;

/// SQLite-backed storage for player job memberships
///
/// Every operation checks out its own pooled connection and each
/// statement commits on its own; nothing spans a transaction.
#[derive(Debug, Clone)]
pub struct ProgressionStore {
    pool: ConnectionPool,
}

impl ProgressionStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with(&ConnectionSettings::new(path))
    }

    /// Open a database file with explicit pool settings
    pub fn open_with(settings: &ConnectionSettings) -> Result<Self> {
        let pool = ConnectionPool::open(settings)?;
        Self::from_pool(pool)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        Self::from_pool(pool)
    }

    /// Wrap an existing pool, bringing its schema up to date
    pub fn from_pool(pool: ConnectionPool) -> Result<Self> {
        let store = Self { pool };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.pool.get()?;
        let applied = schema::run_migrations(&conn)?;
        tracing::info!(
            database = self.pool.location(),
            applied,
            version = schema::SCHEMA_VERSION,
            "progression store ready"
        );
        Ok(())
    }

    /// The pool backing this store
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    // ========== Membership Operations ==========

    /// Load every membership held by a player.
    ///
    /// A player with no memberships yields an empty list. Rows come back
    /// in storage order.
    pub fn load_all_memberships(&self, player: &str) -> Result<Vec<MembershipRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare_cached(
            "SELECT experience, level, job FROM jobs WHERE username = ?1"
        )?;

        let records = stmt
            .query_map([player], |row| self.row_to_membership(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(player, count = records.len(), "loaded memberships");
        Ok(records)
    }

    /// Record that a player joined a job, at experience 0 and level 1.
    ///
    /// This is a blind insert. Calling it twice for the same pair stores
    /// two rows; callers check their own membership state first.
    pub fn add_membership(&self, player: &str, job: &str) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            r#"
            INSERT INTO jobs (username, experience, level, job)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![player, STARTING_EXPERIENCE, STARTING_LEVEL, job],
        )?;

        tracing::debug!(player, job, "added membership");
        Ok(())
    }

    /// Remove a player's membership in a job.
    ///
    /// Returns the number of rows deleted; zero means there was nothing to
    /// remove and is not an error.
    pub fn remove_membership(&self, player: &str, job: &str) -> Result<usize> {
        let conn = self.pool.get()?;
        let removed = conn.execute(
            "DELETE FROM jobs WHERE username = ?1 AND job = ?2",
            params![player, job],
        )?;

        tracing::debug!(player, job, removed, "removed membership");
        Ok(removed)
    }

    /// Overwrite experience and level for each listed job the player holds.
    ///
    /// Updates only; an entry with no matching row changes nothing. Each
    /// update commits on its own, so a failure stops the remaining entries
    /// but keeps the ones already written. Returns the rows updated.
    ///
    /// Levels start at 1; a list carrying level 0 is rejected before
    /// anything is written.
    pub fn save_progression(&self, player: &str, updates: &[ProgressionUpdate]) -> Result<usize> {
        if let Some(update) = updates.iter().find(|u| u.level == 0) {
            return Err(Error::InvalidLevel { job: update.job.clone() });
        }

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare_cached(
            "UPDATE jobs SET experience = ?1, level = ?2 WHERE username = ?3 AND job = ?4"
        )?;

        let mut updated = 0;
        for update in updates {
            let changed = stmt.execute(params![update.experience, update.level, player, update.job])?;
            if changed == 0 {
                tracing::warn!(player, job = %update.job, "no membership to save progression into");
            }
            updated += changed;
        }

        tracing::debug!(player, entries = updates.len(), updated, "saved progression");
        Ok(updated)
    }

    /// Count the players holding a job (used for slot limits)
    pub fn count_members(&self, job: &str) -> Result<u64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM jobs WHERE job = ?1",
            [job],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Join a job after the checks `add_membership` leaves to its callers.
    ///
    /// Refuses when the player already holds the job, or when `max_slots`
    /// is given and the job already has that many members.
    pub fn join_checked(&self, player: &str, job: &str, max_slots: Option<u64>) -> Result<JoinOutcome> {
        let held = self.load_all_memberships(player)?;
        if held.iter().any(|record| record.job == job) {
            return Ok(JoinOutcome::AlreadyMember);
        }

        if let Some(max_slots) = max_slots {
            let taken = self.count_members(job)?;
            if taken >= max_slots {
                return Ok(JoinOutcome::Full { taken, max_slots });
            }
        }

        self.add_membership(player, job)?;
        Ok(JoinOutcome::Joined)
    }

    // ========== Aggregate Operations ==========

    /// Member count for every job that has at least one member, by job name
    pub fn list_job_counts(&self) -> Result<Vec<(String, u64)>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT job, COUNT(*) FROM jobs GROUP BY job ORDER BY job"
        )?;

        let counts = stmt
            .query_map([], |row| {
                let job: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((job, count as u64))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.pool.get()?;
        let (memberships, players, jobs): (i64, i64, i64) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT username), COUNT(DISTINCT job) FROM jobs",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(StoreStats {
            memberships: memberships as u64,
            players: players as u64,
            jobs: jobs as u64,
        })
    }

    /// Helper to convert a row to a MembershipRecord
    fn row_to_membership(&self, row: &rusqlite::Row) -> rusqlite::Result<MembershipRecord> {
        Ok(MembershipRecord {
            experience: row.get(0)?,
            level: row.get(1)?,
            job: row.get(2)?,
        })
    }
}

/// Result of a checked join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    /// The player already holds the job; nothing was written
    AlreadyMember,
    /// The job has no free slot; nothing was written
    Full { taken: u64, max_slots: u64 },
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub memberships: u64,
    pub players: u64,
    pub jobs: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Memberships: {}", self.memberships)?;
        writeln!(f, "  Players: {}", self.players)?;
        writeln!(f, "  Jobs: {}", self.jobs)
    }
}

//! Membership types - one player's standing in one job
//!
//! A player holds zero or more jobs. For each held job the store keeps
//! the accumulated experience and the current level.

use serde::{Deserialize, Serialize};

/// Experience every new membership starts with.
pub const STARTING_EXPERIENCE: u32 = 0;

/// Level every new membership starts at.
pub const STARTING_LEVEL: u32 = 1;

/// A persisted membership as seen from a player's load.
///
/// The player identity is the lookup key, so it is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// Job identifier, as stored
    pub job: String,
    /// Accumulated experience in the job
    pub experience: u32,
    /// Current level in the job (starts at 1)
    pub level: u32,
}

impl MembershipRecord {
    pub fn new(job: impl Into<String>, experience: u32, level: u32) -> Self {
        Self {
            job: job.into(),
            experience,
            level,
        }
    }

    /// The state of a membership right after joining.
    pub fn joined(job: impl Into<String>) -> Self {
        Self::new(job, STARTING_EXPERIENCE, STARTING_LEVEL)
    }
}

impl std::fmt::Display for MembershipRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (level {}, {} xp)", self.job, self.level, self.experience)
    }
}

/// New experience and level for one job, written by a save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionUpdate {
    pub job: String,
    pub experience: u32,
    pub level: u32,
}

impl ProgressionUpdate {
    pub fn new(job: impl Into<String>, experience: u32, level: u32) -> Self {
        Self {
            job: job.into(),
            experience,
            level,
        }
    }
}

impl From<MembershipRecord> for ProgressionUpdate {
    fn from(record: MembershipRecord) -> Self {
        Self {
            job: record.job,
            experience: record.experience,
            level: record.level,
        }
    }
}

use tabled::{settings::Style, Table, Tabled};

use crate::membership::MembershipRecord;

#[derive(Tabled)]
struct MembershipRow {
    #[tabled(rename = "Job")]
    job: String,
    #[tabled(rename = "Level")]
    level: u32,
    #[tabled(rename = "Experience")]
    experience: u32,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Job")]
    job: String,
    #[tabled(rename = "Members")]
    members: u64,
}

/// Render a player's memberships; empty string when there are none
pub fn memberships_table(records: &[MembershipRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<MembershipRow> = records
        .iter()
        .map(|r| MembershipRow {
            job: r.job.clone(),
            level: r.level,
            experience: r.experience,
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render per-job member counts; empty string when there are none
pub fn counts_table(counts: &[(String, u64)]) -> String {
    if counts.is_empty() {
        return String::new();
    }

    let rows: Vec<CountRow> = counts
        .iter()
        .map(|(job, members)| CountRow {
            job: job.clone(),
            members: *members,
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

use std::path::Path;

use clap::ValueEnum;
use jobstore::ui::{self, Icons};
use jobstore::{JoinOutcome, ProgressionStore, ProgressionUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Text
    }
}

pub fn run_init(
    store: &ProgressionStore,
    existed: bool,
    written_config: Option<&Path>,
) -> anyhow::Result<()> {
    if existed {
        ui::header(Icons::DATABASE, "Progression store is up to date");
    } else {
        ui::header(Icons::DATABASE, "Progression store created");
    }
    ui::info("Database", store.pool().location());
    if let Some(path) = written_config {
        ui::info("Config", &path.display().to_string());
    }
    Ok(())
}

pub fn run_join(
    store: &ProgressionStore,
    player: &str,
    job: &str,
    max_slots: Option<u64>,
) -> anyhow::Result<()> {
    match store.join_checked(player, job, max_slots)? {
        JoinOutcome::Joined => {
            ui::success(&format!("{} {} joined {}", Icons::JOIN, player, job));
            Ok(())
        }
        JoinOutcome::AlreadyMember => anyhow::bail!("{} is already a {}", player, job),
        JoinOutcome::Full { taken, max_slots } => {
            anyhow::bail!("{} is full ({}/{} slots taken)", job, taken, max_slots)
        }
    }
}

pub fn run_quit(store: &ProgressionStore, player: &str, job: &str) -> anyhow::Result<()> {
    let removed = store.remove_membership(player, job)?;
    if removed == 0 {
        ui::warn(&format!("{} does not hold {}", player, job));
    } else {
        ui::success(&format!("{} {} left {}", Icons::QUIT, player, job));
    }
    Ok(())
}

pub fn run_save(
    store: &ProgressionStore,
    player: &str,
    job: &str,
    experience: u32,
    level: u32,
) -> anyhow::Result<()> {
    let updated = store.save_progression(player, &[ProgressionUpdate::new(job, experience, level)])?;
    if updated == 0 {
        ui::warn(&format!("{} does not hold {}; nothing saved", player, job));
    } else {
        ui::success(&format!("{} Saved {} as level {} with {} xp", Icons::SAVE, job, level, experience));
    }
    Ok(())
}

pub fn run_show(store: &ProgressionStore, player: &str, mode: OutputMode) -> anyhow::Result<()> {
    let records = store.load_all_memberships(player)?;

    if !mode.is_human() {
        let data = serde_json::json!({
            "player": player,
            "memberships": records,
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    ui::header(Icons::PERSON, player);
    if records.is_empty() {
        ui::info("Jobs", "none");
    } else {
        println!("{}", ui::memberships_table(&records));
    }
    Ok(())
}

pub fn run_count(store: &ProgressionStore, job: &str, mode: OutputMode) -> anyhow::Result<()> {
    let members = store.count_members(job)?;

    if mode.is_human() {
        ui::info(&format!("{} {}", Icons::PICK, job), &members.to_string());
    } else {
        let data = serde_json::json!({
            "job": job,
            "members": members,
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(())
}

pub fn run_stats(store: &ProgressionStore) -> anyhow::Result<()> {
    let stats = store.stats()?;
    let counts = store.list_job_counts()?;

    ui::header(Icons::STATS, &format!("Jobstore Statistics ({})", store.pool().location()));
    println!("{}", stats);

    if !counts.is_empty() {
        ui::section("Members per job");
        println!("{}", ui::counts_table(&counts));
    }
    Ok(())
}

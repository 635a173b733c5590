//! Jobstore CLI - operator access to the job progression store

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use jobstore::config::{self, StoreConfig};
use jobstore::ProgressionStore;
use jobstore::storage::pool::database_exists;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::OutputMode;

#[derive(Parser)]
#[command(name = "jobstore")]
#[command(version)]
#[command(about = "Inspect and maintain per-player job progression")]
#[command(long_about = r#"
Jobstore keeps which jobs each player holds, with experience and level.

Example usage:
  jobstore init --write-config
  jobstore join Alice Miner --max-slots 10
  jobstore save Alice Miner 50 3
  jobstore show Alice --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and bring its schema up to date
    Init {
        /// Also write the effective config to the config path
        #[arg(long)]
        write_config: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Add a player to a job
    Join {
        player: String,
        job: String,

        /// Refuse the join once the job has this many members
        #[arg(long)]
        max_slots: Option<u64>,
    },

    /// Remove a player from a job
    Quit {
        player: String,
        job: String,
    },

    /// Overwrite a player's experience and level in a job
    Save {
        player: String,
        job: String,
        experience: u32,
        level: u32,
    },

    /// Show every job a player holds
    Show {
        player: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputMode,
    },

    /// Count the members of a job
    Count {
        job: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputMode,
    },

    /// Show statistics about the store
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let storage_down = err
                .downcast_ref::<jobstore::Error>()
                .is_some_and(jobstore::Error::is_connectivity);
            if storage_down {
                tracing::error!(error = %err, "progression storage unavailable, shutting down");
            } else {
                tracing::error!(error = %err, "command failed");
            }
            jobstore::ui::error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let creating_config = matches!(cli.command, Commands::Init { write_config: true, .. })
        && !config_path.exists();
    let mut store_config = if creating_config {
        StoreConfig::default()
    } else {
        config::load_config(cli.config.as_deref())?
    };
    if let Some(database) = cli.database {
        store_config = store_config.with_database(database)?;
    }

    let open = || open_store(&store_config);

    match cli.command {
        Commands::Init { write_config, force } => {
            if write_config {
                config::write_config(&config_path, &store_config, force)?;
            }
            let existed = database_exists(&store_config.database.path);
            commands::run_init(&open()?, existed, write_config.then_some(config_path.as_path()))
        }
        Commands::Join { player, job, max_slots } => {
            commands::run_join(&open()?, &player, &job, max_slots)
        }
        Commands::Quit { player, job } => commands::run_quit(&open()?, &player, &job),
        Commands::Save { player, job, experience, level } => {
            commands::run_save(&open()?, &player, &job, experience, level)
        }
        Commands::Show { player, format } => commands::run_show(&open()?, &player, format),
        Commands::Count { job, format } => commands::run_count(&open()?, &job, format),
        Commands::Stats => commands::run_stats(&open()?),
    }
}

fn open_store(store_config: &StoreConfig) -> anyhow::Result<ProgressionStore> {
    config::ensure_db_dir(&store_config.database.path)?;
    let store = ProgressionStore::open_with(&store_config.connection_settings())?;
    Ok(store)
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::ConnectionSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub pool_size: u32,
    pub connection_timeout_ms: u64,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            pool_size: 4,
            connection_timeout_ms: 5000,
            busy_timeout_ms: 2000,
        }
    }
}

impl StoreConfig {
    /// Reject settings no pool can be built from
    pub fn validate(&self) -> crate::Result<()> {
        if self.database.pool_size == 0 {
            return Err(crate::Error::Config("database.pool_size must be at least 1".to_string()));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(crate::Error::Config("database.path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Point at another database file, re-checking the result
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> crate::Result<Self> {
        self.database.path = path.into();
        self.validate()?;
        Ok(self)
    }

    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            path: self.database.path.clone(),
            max_size: self.database.pool_size,
            connection_timeout: Duration::from_millis(self.database.connection_timeout_ms),
            busy_timeout: Duration::from_millis(self.database.busy_timeout_ms),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("jobstore.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("plugins").join("Jobs").join("jobs.db")
}

/// Load the config file.
///
/// With no explicit path, a missing `jobstore.toml` means defaults. An
/// explicit path has to exist.
pub fn load_config(path: Option<&Path>) -> crate::Result<StoreConfig> {
    match path {
        Some(path) => read_config(path, true),
        None => read_config(&default_config_path(), false),
    }
}

fn read_config(path: &Path, required: bool) -> crate::Result<StoreConfig> {
    if !path.exists() {
        if required {
            return Err(crate::Error::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(StoreConfig::default());
    }

    let contents = std::fs::read_to_string(path)?;
    let config: StoreConfig = toml::from_str(&contents)
        .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

pub fn write_config(path: &Path, config: &StoreConfig, force: bool) -> crate::Result<()> {
    if path.exists() && !force {
        return Err(crate::Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> crate::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

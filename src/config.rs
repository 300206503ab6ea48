//! Configuration loading and database path resolution

use crate::database::store::{DEFAULT_QUICK_SAVES, TimeSource};
use crate::models::stats::DEFAULT_MASTERED_AFTER;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_ENV: &str = "VOCAB_BOOST_CONFIG";
pub const DATABASE_ENV: &str = "VOCAB_BOOST_DB";
const APP_DIR: &str = "vocab-boost";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// "wall" for real time, "simulated" to step through days by hand
    pub clock: TimeSource,
    pub quick_saves_collection: String,
    /// Repetition count above which a card counts as mastered
    pub mastered_after: u32,
    /// tracing filter directive used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            clock: TimeSource::Wall,
            quick_saves_collection: DEFAULT_QUICK_SAVES.to_string(),
            mastered_after: DEFAULT_MASTERED_AFTER,
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Resolves configuration in priority order:
    /// 1. Explicit config file argument
    /// 2. `VOCAB_BOOST_CONFIG` environment variable
    /// 3. `<config dir>/vocab-boost/config.toml` if it exists
    /// 4. Built-in defaults
    ///
    /// A database path argument, then `VOCAB_BOOST_DB`, override whatever the file says.
    pub fn resolve(config_arg: Option<&Path>, database_arg: Option<&Path>) -> Result<Self> {
        let env_config = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let config_path = config_arg
            .map(Path::to_path_buf)
            .or(env_config)
            .or_else(|| default_config_file().filter(|p| p.exists()));

        let mut config = match config_path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        if let Some(path) = database_arg {
            config.database_path = path.to_path_buf();
        } else if let Some(path) = std::env::var_os(DATABASE_ENV) {
            config.database_path = PathBuf::from(path);
        }

        if config.quick_saves_collection.trim().is_empty() {
            return Err(Error::Config(
                "quick_saves_collection must not be empty".to_string(),
            ));
        }

        Ok(config)
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR).join("vocab.sqlite3"))
        .unwrap_or_else(|| PathBuf::from("vocab.sqlite3"))
}

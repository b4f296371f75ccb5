//! `stockroom.toml` loading.
//!
//! The file is optional; a missing file means defaults. The database location
//! is decided here, once, before the store is opened.

use crate::core::error::StockroomError;
use crate::core::schemas;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "stockroom.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Relative paths resolve against the directory the config was loaded from.
    pub database_path: PathBuf,
    /// Drop and recreate `items` every time the interactive session starts.
    pub reset_on_start: bool,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(schemas::DEFAULT_DB_NAME),
            reset_on_start: false,
            log_filter: "warn".to_string(),
        }
    }
}

/// Load `<root>/stockroom.toml`, or defaults when it does not exist.
pub fn load_config(root: &Path) -> Result<Config, StockroomError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&config_path).map_err(StockroomError::IoError)?;
    toml::from_str(&content).map_err(|e| {
        StockroomError::ConfigError(format!("{}: {}", config_path.display(), e))
    })
}

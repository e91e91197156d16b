//! Application settings loading from refeitorio.toml and the environment.
//!
//! The settings file is optional; every field has a default and the
//! environment can override each one (`DATABASE_URL`,
//! `DEFAULT_MEAL_CAPACITY`, `IMPORT_MAX_FILE_KB`). Environment wins over the
//! file, the file wins over defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default settings file location, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "refeitorio.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Seating capacity given to newly created meal slots
    #[serde(default = "default_meal_capacity")]
    pub default_meal_capacity: i32,
    /// Upper bound for spreadsheet-import uploads, in kilobytes
    #[serde(default = "default_import_max_file_kb")]
    pub import_max_file_kb: u64,
}

fn default_database_url() -> String {
    "sqlite://data/refeitorio.sqlite".to_string()
}

const fn default_meal_capacity() -> i32 {
    100
}

const fn default_import_max_file_kb() -> u64 {
    2048
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            default_meal_capacity: default_meal_capacity(),
            import_max_file_kb: default_import_max_file_kb(),
        }
    }
}

impl Settings {
    /// Applies environment overrides on top of the loaded values.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = url;
        }
        if let Ok(raw) = std::env::var("DEFAULT_MEAL_CAPACITY") {
            self.default_meal_capacity = raw.parse().map_err(|_| Error::Config {
                message: format!("DEFAULT_MEAL_CAPACITY must be an integer, got {raw:?}"),
            })?;
        }
        if let Ok(raw) = std::env::var("IMPORT_MAX_FILE_KB") {
            self.import_max_file_kb = raw.parse().map_err(|_| Error::Config {
                message: format!("IMPORT_MAX_FILE_KB must be an integer, got {raw:?}"),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Rejects values that would break the business rules downstream.
    pub fn validate(&self) -> Result<()> {
        if self.default_meal_capacity <= 0 {
            return Err(Error::Config {
                message: format!(
                    "default_meal_capacity must be positive, got {}",
                    self.default_meal_capacity
                ),
            });
        }
        Ok(())
    }
}

/// Loads settings from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    let settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file: {e}"),
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from the default location, falling back to defaults when
/// the file does not exist, then applies environment overrides.
pub fn load() -> Result<Settings> {
    let base = if Path::new(DEFAULT_SETTINGS_PATH).exists() {
        load_config(DEFAULT_SETTINGS_PATH)?
    } else {
        Settings::default()
    };
    base.with_env_overrides()
}

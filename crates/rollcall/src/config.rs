//! Configuration management for rollcall.
//!
//! Configuration is layered with figment: defaults, then a TOML file, then
//! `ROLLCALL_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::RecordStore;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the platform config/data dirs.
const APP_DIR_NAME: &str = "rollcall";

/// Application configuration.
///
/// Sources, highest precedence first:
/// 1. Environment variables (prefixed with `ROLLCALL_`, nested on `_`)
/// 2. TOML config file at `~/.config/rollcall/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the roster and attendance files live.
    pub storage: StorageConfig,
    /// Snapshot export settings.
    pub export: ExportConfig,
    /// Login credentials.
    pub auth: AuthConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the data files.
    /// Defaults to `~/.local/share/rollcall`
    pub dir: Option<PathBuf>,
    /// Roster file name inside `dir`.
    pub roster: String,
    /// Attendance file name inside `dir`.
    pub attendance: String,
    /// Write seed data when the data files are absent.
    pub seed: bool,
}

/// Export-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for `attendance_export_<date>.csv` files.
    /// Defaults to the current directory.
    pub dir: Option<PathBuf>,
}

/// Credentials checked by the `login` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted username.
    pub username: String,
    /// Accepted password.
    pub password: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            roster: "students.csv".to_string(),
            attendance: "attendance.csv".to_string(),
            seed: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "12345".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, reading `config_path` or the default location.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ROLLCALL_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        check_file_name("storage.roster", &self.storage.roster)?;
        check_file_name("storage.attendance", &self.storage.attendance)?;

        if self.storage.roster == self.storage.attendance {
            return Err(Error::ConfigValidation {
                message: format!(
                    "storage.roster and storage.attendance must differ (both '{}')",
                    self.storage.roster
                ),
            });
        }

        if self.auth.username.trim().is_empty() || self.auth.password.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "auth.username and auth.password must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Full path to the roster file.
    #[must_use]
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.roster)
    }

    /// Full path to the attendance file.
    #[must_use]
    pub fn attendance_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.attendance)
    }

    /// Directory for exports, resolving defaults if not set.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Build the record store for the configured files.
    #[must_use]
    pub fn record_store(&self) -> RecordStore {
        RecordStore::new(self.roster_path(), self.attendance_path())
    }
}

fn check_file_name(key: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: format!("{key} must not be empty"),
        });
    }
    let path = Path::new(name);
    if path.components().count() != 1 || path.file_name().is_none() {
        return Err(Error::ConfigValidation {
            message: format!("{key} must be a plain file name, got '{name}'"),
        });
    }
    Ok(())
}

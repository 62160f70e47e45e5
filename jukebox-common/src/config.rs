//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration lives in a small TOML file. A missing or
//! unreadable file is never fatal: compiled defaults are used instead and
//! the returned [`ConfigSource`] carries the warning to log.
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `JUKEBOX_ROOT_FOLDER` environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::db::DATABASE_FILE_NAME;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "JUKEBOX_ROOT_FOLDER";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TomlConfig {
    /// Folder holding the catalog database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Compiled defaults, with the reason no file was used
    Defaults(String),
}

impl ConfigSource {
    /// Report the outcome: info for a file, warning for a fallback
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Defaults(reason) => warn!("{}; using compiled defaults", reason),
        }
    }

    pub fn is_defaults(&self) -> bool {
        matches!(self, ConfigSource::Defaults(_))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Search indexing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of entries fetched and pushed per batch during a full reindex
    #[serde(default = "default_reindex_batch_size")]
    pub reindex_batch_size: usize,

    /// Maximum length of a search result summary's content
    #[serde(default = "default_summary_max_content_length")]
    pub summary_max_content_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            reindex_batch_size: default_reindex_batch_size(),
            summary_max_content_length: default_summary_max_content_length(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reindex_batch_size() -> usize {
    100
}

fn default_summary_max_content_length() -> usize {
    200
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the platform config file, falling back to defaults
    ///
    /// Nothing is logged here: loading happens before the subscriber is
    /// installed, so callers report the returned [`ConfigSource`] once
    /// tracing is up.
    pub fn load_platform() -> (Self, ConfigSource) {
        match config_file_path() {
            Ok(path) => Self::load_or_defaults_from(&path),
            Err(e) => (Self::default(), ConfigSource::Defaults(e.to_string())),
        }
    }

    /// Load `path`, or compiled defaults if it is missing or invalid
    pub fn load_or_defaults_from(path: &Path) -> (Self, ConfigSource) {
        match Self::load(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(e) => (
                Self::default(),
                ConfigSource::Defaults(format!(
                    "Failed to load config {}: {}",
                    path.display(),
                    e
                )),
            ),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.reindex_batch_size == 0 {
            return Err(Error::Config(
                "search.reindex_batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the root folder following the documented priority order
pub fn resolve_root_folder(cli_arg: Option<&str>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// Path of the catalog database inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE_NAME)
}

/// Get default configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // ~/.config/jukebox/config.toml first, then /etc/jukebox/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("jukebox").join("config.toml"));
        let system_config = PathBuf::from("/etc/jukebox/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let path = dirs::config_dir()
        .map(|d| d.join("jukebox").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/jukebox (or /var/lib/jukebox for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("jukebox"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/jukebox"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("jukebox"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/jukebox"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("jukebox"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\jukebox"))
    } else {
        PathBuf::from("./jukebox_data")
    }
}

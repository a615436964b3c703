//! Configuration settings for gearstash.
//!
//! Settings are loaded from `~/.gearstash/config.yaml`. Every field is
//! optional; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::GearError;

/// Key prefix for fallback cache entries.
pub const DEFAULT_BACKUP_PREFIX: &str = "gearList_backup";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Local storage settings.
    pub storage: StorageConfig,
    /// Remote sync settings.
    pub sync: SyncConfig,
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix for fallback cache keys (`<prefix>_<userId>`).
    #[serde(default = "default_backup_prefix")]
    pub backup_prefix: String,
}

/// Remote sync settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the sync endpoint. Entries are POSTed to `{endpoint}/sync`.
    ///
    /// When unset every push fails and queued entries are eventually dropped.
    pub endpoint: Option<String>,
}

fn default_backup_prefix() -> String {
    DEFAULT_BACKUP_PREFIX.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backup_prefix: default_backup_prefix(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, GearError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, GearError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            GearError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            GearError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), GearError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| GearError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            GearError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Override the sync endpoint, e.g. from a command-line flag.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if endpoint.is_some() {
            self.sync.endpoint = endpoint;
        }
        self
    }

    fn validate(&self) -> Result<(), GearError> {
        if self.storage.backup_prefix.is_empty() {
            return Err(GearError::Config(
                "storage.backup_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

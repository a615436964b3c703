//! Path resolution for gearstash configuration and data files.
//!
//! All gearstash data is stored in `~/.gearstash/`:
//! - `config.yaml` - Main configuration file
//! - `gearstash.db` - SQLite database holding gear lists and the sync queue
//! - `backup.json` - Fallback cache mirrored on every save

use std::path::PathBuf;

use crate::error::GearError;

/// Paths to gearstash configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.gearstash/`
    pub root: PathBuf,
    /// Config file: `~/.gearstash/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.gearstash/gearstash.db`
    pub database: PathBuf,
    /// Fallback cache file: `~/.gearstash/backup.json`
    pub backup: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, GearError> {
        let home = std::env::var("HOME")
            .map_err(|_| GearError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".gearstash")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("gearstash.db"),
            backup: root.join("backup.json"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), GearError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                GearError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

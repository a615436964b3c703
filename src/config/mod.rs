//! Configuration management for gearstash.
//!
//! This module handles loading configuration and resolving data paths under
//! `~/.gearstash/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, StorageConfig, SyncConfig, DEFAULT_BACKUP_PREFIX};

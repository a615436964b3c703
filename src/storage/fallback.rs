//! Fallback cache stored as a single flat JSON object on disk.
//!
//! Keys follow `<prefix>_<userId>`, values are serialized gear lists. Every
//! `put` rewrites the whole file through a temporary file and a rename, so
//! the cache on disk is always a complete document.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::KeyValueBackend;
use crate::error::GearError;

/// Flat string-keyed cache persisted to one JSON file.
pub struct FileCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileCache {
    /// Cache stored at `path`. The file is read on `open`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: BTreeMap::new(),
        }
    }

    /// Fallback cache key for a user.
    #[must_use]
    pub fn key_for(prefix: &str, user_id: &str) -> String {
        format!("{prefix}_{user_id}")
    }

    fn persist(&self) -> Result<(), GearError> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueBackend for FileCache {
    fn name(&self) -> &'static str {
        "file-cache"
    }

    fn open(&mut self) -> Result<(), GearError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !self.path.exists() {
            debug!(path = %self.path.display(), "fallback cache file not present yet");
            return Ok(());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(());
        }

        self.entries = serde_json::from_str(&contents).map_err(|e| {
            GearError::Parse(format!(
                "Corrupt fallback cache {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, GearError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), GearError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

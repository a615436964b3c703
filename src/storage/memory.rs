//! In-process key/value backend.

use std::collections::HashMap;

use super::KeyValueBackend;
use crate::error::GearError;

/// Backend holding values in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that refuses to open, standing in for an engine
    /// that is missing or corrupt.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            unavailable: true,
        }
    }
}

impl KeyValueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn open(&mut self) -> Result<(), GearError> {
        if self.unavailable {
            return Err(GearError::Database(
                "In-memory backend is unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, GearError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), GearError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

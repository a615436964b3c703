//! Error types for gearstash.

use thiserror::Error;

/// Errors that can occur while storing, reading or syncing gear lists.
#[derive(Debug, Error)]
pub enum GearError {
    /// The SQLite store could not be opened or queried.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be serialized or deserialized.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Caller supplied invalid input.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Saving to the primary store failed. The fallback cache was still written.
    #[error("Failed to save gear list: {0}")]
    Write(String),

    /// Pushing a queue entry to the remote endpoint failed.
    #[error("Sync failed: {0}")]
    Sync(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for GearError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl GearError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::NotFound(_) => 2,
            Self::Config(_) => 3,
            Self::Database(_) | Self::Io(_) | Self::Write(_) => 4,
            Self::Parse(_) | Self::Sync(_) => 1,
        }
    }
}

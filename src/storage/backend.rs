//! Key/value capability shared by the primary store and the fallback cache.

use crate::error::GearError;
use crate::sync::QueueStore;

/// A string-keyed store of serialized gear lists.
pub trait KeyValueBackend {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Open the backend, creating any schema or files it needs.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be used this session.
    fn open(&mut self) -> Result<(), GearError>;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, GearError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn put(&mut self, key: &str, value: &str) -> Result<(), GearError>;

    /// Durable sync queue living alongside this backend, if it has one.
    ///
    /// Only meaningful after a successful [`open`](Self::open).
    fn queue_store(&self) -> Option<Box<dyn QueueStore>> {
        None
    }
}

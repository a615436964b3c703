//! The local gear store.
//!
//! [`GearStore`] is the one context object callers hold. It owns both
//! storage tiers, the sync queue and the transport:
//!
//! - the fallback cache is written on every save, whatever happens to the
//!   primary store
//! - the primary store is written when it opened successfully; when it
//!   did not, the session runs from the fallback cache alone and keeps its
//!   sync queue in memory
//! - every successful save enqueues an `update` entry and drains the queue

use tracing::{debug, error, info, warn};

use crate::config::{Config, Paths};
use crate::error::GearError;
use crate::gear::GearItem;
use crate::storage::{FileCache, KeyValueBackend, SqliteBackend};
use crate::sync::{
    drain, DrainReport, HttpTransport, MemoryQueue, QueueStats, QueueStore, SyncQueueEntry,
    SyncTransport,
};

/// Local gear list store with fallback cache and sync queue.
pub struct GearStore {
    primary: Box<dyn KeyValueBackend>,
    fallback: Box<dyn KeyValueBackend>,
    queue: Box<dyn QueueStore>,
    transport: Box<dyn SyncTransport>,
    backup_prefix: String,
    primary_available: bool,
}

impl GearStore {
    /// Assemble a store. Call [`initialize`](Self::initialize) before use.
    #[must_use]
    pub fn new(
        primary: Box<dyn KeyValueBackend>,
        fallback: Box<dyn KeyValueBackend>,
        transport: Box<dyn SyncTransport>,
        backup_prefix: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            fallback,
            queue: Box::new(MemoryQueue::new()),
            transport,
            backup_prefix: backup_prefix.into(),
            primary_available: false,
        }
    }

    /// Store using the default on-disk layout and configured endpoint.
    #[must_use]
    pub fn from_config(paths: &Paths, config: &Config) -> Self {
        Self::new(
            Box::new(SqliteBackend::at(paths.database.clone())),
            Box::new(FileCache::new(paths.backup.clone())),
            Box::new(HttpTransport::from_config(&config.sync)),
            config.storage.backup_prefix.clone(),
        )
    }

    /// Open both storage tiers.
    ///
    /// Never fails. If the primary store cannot be opened the store stays in
    /// fallback-only mode for the rest of the session.
    pub fn initialize(&mut self) {
        match self.primary.open() {
            Ok(()) => {
                self.primary_available = true;
                if let Some(queue) = self.primary.queue_store() {
                    self.queue = queue;
                }
                info!(backend = self.primary.name(), "primary store initialized");
            },
            Err(e) => {
                self.primary_available = false;
                warn!(
                    backend = self.primary.name(),
                    error = %e,
                    "primary store unavailable, using fallback cache only"
                );
            },
        }

        if let Err(e) = self.fallback.open() {
            error!(backend = self.fallback.name(), error = %e, "failed to open fallback cache");
        }
    }

    /// Whether the session is running without the primary store.
    #[must_use]
    pub const fn is_fallback_only(&self) -> bool {
        !self.primary_available
    }

    /// Fallback cache key for a user.
    #[must_use]
    pub fn fallback_key(&self, user_id: &str) -> String {
        FileCache::key_for(&self.backup_prefix, user_id)
    }

    /// Replace the gear list of a user.
    ///
    /// The fallback cache is written even when the primary write fails.
    /// On success an `update` entry is queued and the queue drained; sync
    /// problems are logged only.
    ///
    /// # Errors
    ///
    /// Returns `GearError::Validation` for an empty user id and
    /// `GearError::Write` when either storage tier rejects the write.
    pub fn save_gear_list(&mut self, user_id: &str, items: &[GearItem]) -> Result<(), GearError> {
        if user_id.is_empty() {
            return Err(GearError::Validation(
                "User id must not be empty".to_string(),
            ));
        }

        let value = serde_json::to_string(items)?;

        let primary_result = if self.primary_available {
            self.primary.put(user_id, &value)
        } else {
            Ok(())
        };

        let key = self.fallback_key(user_id);
        let fallback_result = self.fallback.put(&key, &value);

        if let Err(e) = primary_result {
            error!(user_id, error = %e, "failed to save gear list to primary store");
            return Err(GearError::Write(e.to_string()));
        }
        if let Err(e) = fallback_result {
            error!(user_id, error = %e, "failed to mirror gear list to fallback cache");
            return Err(GearError::Write(format!("fallback cache: {e}")));
        }

        debug!(user_id, items = items.len(), "gear list saved");

        match SyncQueueEntry::gear_list_update(user_id, items) {
            Ok(entry) => self.queue_sync(entry),
            Err(e) => error!(user_id, error = %e, "failed to build sync entry"),
        }

        Ok(())
    }

    /// Read the gear list of a user.
    ///
    /// Tries the primary store, then the fallback cache. Missing or
    /// unreadable data gives an empty list.
    #[must_use]
    pub fn get_gear_list(&self, user_id: &str) -> Vec<GearItem> {
        if self.primary_available {
            match self.primary.get(user_id) {
                Ok(Some(raw)) => match serde_json::from_str(&raw) {
                    Ok(items) => return items,
                    Err(e) => warn!(user_id, error = %e, "unreadable gear list in primary store"),
                },
                Ok(None) => {},
                Err(e) => warn!(user_id, error = %e, "failed to read primary store"),
            }
        }

        match self.fallback.get(&self.fallback_key(user_id)) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(user_id, error = %e, "unreadable gear list in fallback cache");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(user_id, error = %e, "failed to read fallback cache");
                Vec::new()
            },
        }
    }

    /// Run one drain pass over the sync queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be read or updated.
    pub fn drain_sync_queue(&mut self) -> Result<DrainReport, GearError> {
        drain(self.queue.as_mut(), self.transport.as_ref())
    }

    /// Sync queue statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be read.
    pub fn queue_stats(&self) -> Result<QueueStats, GearError> {
        self.queue.stats()
    }

    /// Discard every pending sync entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be cleared.
    pub fn clear_sync_queue(&mut self) -> Result<usize, GearError> {
        self.queue.clear()
    }

    fn queue_sync(&mut self, mut entry: SyncQueueEntry) {
        if let Err(e) = self.queue.enqueue(&mut entry) {
            error!(error = %e, "failed to queue sync entry");
            return;
        }

        match self.drain_sync_queue() {
            Ok(report) => debug!(
                delivered = report.delivered,
                retrying = report.retrying,
                dropped = report.dropped,
                "sync queue drained"
            ),
            Err(e) => warn!(error = %e, "failed to drain sync queue"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::DEFAULT_BACKUP_PREFIX;
    use crate::storage::MemoryBackend;
    use crate::sync::MockSyncTransport;

    /// Opens fine, rejects every write.
    struct ReadOnlyBackend;

    impl KeyValueBackend for ReadOnlyBackend {
        fn name(&self) -> &'static str {
            "read-only"
        }

        fn open(&mut self) -> Result<(), GearError> {
            Ok(())
        }

        fn get(&self, _key: &str) -> Result<Option<String>, GearError> {
            Ok(None)
        }

        fn put(&mut self, _key: &str, _value: &str) -> Result<(), GearError> {
            Err(GearError::Database("disk I/O error".to_string()))
        }
    }

    fn accepting() -> Box<MockSyncTransport> {
        let mut transport = MockSyncTransport::new();
        transport.expect_push().returning(|_| Ok(()));
        Box::new(transport)
    }

    fn rejecting(times: usize) -> Box<MockSyncTransport> {
        let mut transport = MockSyncTransport::new();
        transport
            .expect_push()
            .times(times)
            .returning(|_| Err(GearError::Sync("503".to_string())));
        Box::new(transport)
    }

    fn store_with(
        primary: Box<dyn KeyValueBackend>,
        fallback: Box<dyn KeyValueBackend>,
        transport: Box<dyn SyncTransport>,
    ) -> GearStore {
        let mut store = GearStore::new(primary, fallback, transport, DEFAULT_BACKUP_PREFIX);
        store.initialize();
        store
    }

    fn tent() -> Vec<GearItem> {
        vec![GearItem::new(1, "Tent", "2.5 kg", "Shelter")]
    }

    #[test]
    fn test_save_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let backup = temp_dir.path().join("backup.json");
        let mut store = store_with(
            Box::new(SqliteBackend::in_memory()),
            Box::new(FileCache::new(backup.clone())),
            accepting(),
        );

        store.save_gear_list("u1", &tent()).unwrap();

        assert_eq!(store.get_gear_list("u1"), tent());

        // The fallback cache holds the same list under the derived key
        let mut cache = FileCache::new(backup);
        cache.open().unwrap();
        let raw = cache.get("gearList_backup_u1").unwrap().unwrap();
        let cached: Vec<GearItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(cached, tent());
    }

    #[test]
    fn test_fallback_only_when_primary_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(
            Box::new(MemoryBackend::unavailable()),
            Box::new(FileCache::new(temp_dir.path().join("backup.json"))),
            accepting(),
        );

        assert!(store.is_fallback_only());

        store.save_gear_list("u1", &tent()).unwrap();
        assert_eq!(store.get_gear_list("u1"), tent());
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = store_with(
            Box::new(SqliteBackend::in_memory()),
            Box::new(MemoryBackend::new()),
            accepting(),
        );

        let second = vec![
            GearItem::new(1, "Tent", "2.5 kg", "Shelter"),
            GearItem::new(2, "Sleeping Bag", "1.2 kg", "Sleep System"),
        ];

        store.save_gear_list("u1", &tent()).unwrap();
        store.save_gear_list("u1", &second).unwrap();

        assert_eq!(store.get_gear_list("u1"), second);
    }

    #[test]
    fn test_unknown_user_reads_empty() {
        let store = store_with(
            Box::new(SqliteBackend::in_memory()),
            Box::new(MemoryBackend::new()),
            accepting(),
        );

        assert!(store.get_gear_list("unknown-user").is_empty());
    }

    #[test]
    fn test_delivered_entry_leaves_queue() {
        let mut store = store_with(
            Box::new(SqliteBackend::in_memory()),
            Box::new(MemoryBackend::new()),
            accepting(),
        );

        store.save_gear_list("u1", &tent()).unwrap();

        assert_eq!(store.queue_stats().unwrap().pending, 0);
    }

    #[test]
    fn test_rejected_entry_dropped_after_three_drains() {
        let mut store = store_with(
            Box::new(SqliteBackend::in_memory()),
            Box::new(MemoryBackend::new()),
            rejecting(3),
        );

        // First drain happens inside the save
        store.save_gear_list("u1", &tent()).unwrap();
        assert_eq!(store.queue_stats().unwrap().pending, 1);

        store.drain_sync_queue().unwrap();
        assert_eq!(store.queue_stats().unwrap().pending, 1);

        let report = store.drain_sync_queue().unwrap();
        assert_eq!(report.dropped, 1);
        assert_eq!(store.queue_stats().unwrap().pending, 0);
    }

    #[test]
    fn test_primary_write_failure_is_reported() {
        let mut store = store_with(
            Box::new(ReadOnlyBackend),
            Box::new(MemoryBackend::new()),
            rejecting(0),
        );

        let err = store.save_gear_list("u1", &tent()).unwrap_err();

        assert!(matches!(err, GearError::Write(_)));
        // Fallback still written, nothing queued
        assert_eq!(store.get_gear_list("u1"), tent());
        assert_eq!(store.queue_stats().unwrap().pending, 0);
    }

    #[test]
    fn test_empty_user_rejected() {
        let mut store = store_with(
            Box::new(SqliteBackend::in_memory()),
            Box::new(MemoryBackend::new()),
            rejecting(0),
        );

        let err = store.save_gear_list("", &tent()).unwrap_err();
        assert!(matches!(err, GearError::Validation(_)));
    }

    #[test]
    fn test_unreadable_primary_falls_back() {
        let mut primary = MemoryBackend::new();
        primary.put("u1", "{garbage").unwrap();

        let mut fallback = MemoryBackend::new();
        fallback
            .put("gearList_backup_u1", &serde_json::to_string(&tent()).unwrap())
            .unwrap();

        let store = store_with(Box::new(primary), Box::new(fallback), rejecting(0));

        assert_eq!(store.get_gear_list("u1"), tent());
    }

    #[test]
    fn test_fallback_only_queues_in_memory() {
        let mut store = store_with(
            Box::new(MemoryBackend::unavailable()),
            Box::new(MemoryBackend::new()),
            rejecting(1),
        );

        store.save_gear_list("u1", &tent()).unwrap();

        let stats = store.queue_stats().unwrap();
        assert_eq!(stats.pending, 1);
        assert!(stats.oldest_pending.is_some());

        assert_eq!(store.clear_sync_queue().unwrap(), 1);
    }

    #[test]
    fn test_custom_backup_prefix() {
        let mut store = GearStore::new(
            Box::new(MemoryBackend::unavailable()),
            Box::new(MemoryBackend::new()),
            accepting(),
            "packs",
        );
        store.initialize();

        assert_eq!(store.fallback_key("u9"), "packs_u9");
    }
}

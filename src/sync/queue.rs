//! Sync queue storage.
//!
//! [`SqliteQueue`] persists entries next to the gear lists; [`MemoryQueue`]
//! keeps them for the session when the database is unavailable.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::warn;

use super::entry::{SyncAction, SyncQueueEntry};
use crate::error::GearError;
use crate::storage::Database;

/// Queue statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStats {
    /// Number of entries waiting for delivery
    pub pending: usize,
    /// Oldest pending entry timestamp
    pub oldest_pending: Option<DateTime<Utc>>,
}

/// Storage for pending sync entries.
pub trait QueueStore {
    /// Append an entry and assign its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be saved.
    fn enqueue(&mut self, entry: &mut SyncQueueEntry) -> Result<(), GearError>;

    /// All pending entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be read.
    fn pending(&self) -> Result<Vec<SyncQueueEntry>, GearError>;

    /// Increment the retry count of an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn record_failure(&mut self, id: i64) -> Result<(), GearError>;

    /// Remove an entry. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn remove(&mut self, id: i64) -> Result<bool, GearError>;

    /// Queue statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn stats(&self) -> Result<QueueStats, GearError>;

    /// Remove every entry. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn clear(&mut self) -> Result<usize, GearError>;
}

/// Sync queue stored in the `sync_queue` table.
///
/// Rows that no longer decode (unknown action, malformed payload) are
/// deleted when the queue is read so they cannot stall later entries.
pub struct SqliteQueue {
    db: Rc<Database>,
}

impl SqliteQueue {
    /// Create a sync queue with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Rc<Database>) -> Self {
        Self { db }
    }
}

impl QueueStore for SqliteQueue {
    fn enqueue(&mut self, entry: &mut SyncQueueEntry) -> Result<(), GearError> {
        let conn = self.db.connection();
        let payload = serde_json::to_string(&entry.payload)?;

        conn.execute(
            r"INSERT INTO sync_queue (action, payload, enqueued_at, retry_count)
              VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.action.as_str(),
                payload,
                entry.timestamp_millis(),
                entry.retry_count,
            ],
        )
        .map_err(|e| GearError::Database(format!("Failed to enqueue sync entry: {e}")))?;

        entry.id = Some(conn.last_insert_rowid());
        Ok(())
    }

    fn pending(&self) -> Result<Vec<SyncQueueEntry>, GearError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, action, payload, enqueued_at, retry_count
                  FROM sync_queue
                  ORDER BY enqueued_at ASC, id ASC",
            )
            .map_err(|e| GearError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], read_row)
            .map_err(|e| GearError::Database(format!("Failed to query sync queue: {e}")))?;

        let mut entries = Vec::new();
        let mut undecodable = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| GearError::Database(e.to_string()))?;
            let id = raw.id;
            match raw.into_entry() {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(id, error = %e, "discarding undecodable sync entry");
                    undecodable.push(id);
                },
            }
        }

        for id in undecodable {
            conn.execute("DELETE FROM sync_queue WHERE id = ?1", [id])
                .map_err(|e| GearError::Database(format!("Failed to delete sync entry: {e}")))?;
        }

        Ok(entries)
    }

    fn record_failure(&mut self, id: i64) -> Result<(), GearError> {
        self.db
            .connection()
            .execute(
                "UPDATE sync_queue SET retry_count = retry_count + 1 WHERE id = ?1",
                [id],
            )
            .map_err(|e| GearError::Database(format!("Failed to record sync failure: {e}")))?;

        Ok(())
    }

    fn remove(&mut self, id: i64) -> Result<bool, GearError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM sync_queue WHERE id = ?1", [id])
            .map_err(|e| GearError::Database(format!("Failed to delete sync entry: {e}")))?;

        Ok(rows > 0)
    }

    fn stats(&self) -> Result<QueueStats, GearError> {
        let conn = self.db.connection();

        let pending: i64 = conn
            .query_row("SELECT COUNT(*) FROM sync_queue", [], |row| row.get(0))
            .map_err(|e| GearError::Database(format!("Failed to count pending: {e}")))?;

        let oldest: Option<i64> = conn
            .query_row(
                "SELECT enqueued_at FROM sync_queue ORDER BY enqueued_at ASC, id ASC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| GearError::Database(format!("Failed to get oldest pending: {e}")))?;

        Ok(QueueStats {
            pending: usize::try_from(pending).unwrap_or(0),
            oldest_pending: oldest.map(SyncQueueEntry::time_from_millis),
        })
    }

    fn clear(&mut self) -> Result<usize, GearError> {
        self.db
            .connection()
            .execute("DELETE FROM sync_queue", [])
            .map_err(|e| GearError::Database(format!("Failed to clear queue: {e}")))
    }
}

struct RawEntry {
    id: i64,
    action: String,
    payload: String,
    enqueued_at: i64,
    retry_count: u32,
}

impl RawEntry {
    fn into_entry(self) -> Result<SyncQueueEntry, GearError> {
        Ok(SyncQueueEntry {
            id: Some(self.id),
            action: SyncAction::parse(&self.action)?,
            payload: serde_json::from_str(&self.payload)?,
            enqueued_at: SyncQueueEntry::time_from_millis(self.enqueued_at),
            retry_count: self.retry_count,
        })
    }
}

fn read_row(row: &Row<'_>) -> Result<RawEntry, rusqlite::Error> {
    Ok(RawEntry {
        id: row.get(0)?,
        action: row.get(1)?,
        payload: row.get(2)?,
        enqueued_at: row.get(3)?,
        retry_count: row.get(4)?,
    })
}

/// Sync queue held in memory for the current session.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    next_id: i64,
    entries: Vec<SyncQueueEntry>,
}

impl MemoryQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueStore for MemoryQueue {
    fn enqueue(&mut self, entry: &mut SyncQueueEntry) -> Result<(), GearError> {
        self.next_id += 1;
        entry.id = Some(self.next_id);
        self.entries.push(entry.clone());
        Ok(())
    }

    fn pending(&self) -> Result<Vec<SyncQueueEntry>, GearError> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| (e.enqueued_at, e.id));
        Ok(entries)
    }

    fn record_failure(&mut self, id: i64) -> Result<(), GearError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == Some(id)) {
            entry.retry_count += 1;
        }
        Ok(())
    }

    fn remove(&mut self, id: i64) -> Result<bool, GearError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != Some(id));
        Ok(self.entries.len() < before)
    }

    fn stats(&self) -> Result<QueueStats, GearError> {
        Ok(QueueStats {
            pending: self.entries.len(),
            oldest_pending: self.entries.iter().map(|e| e.enqueued_at).min(),
        })
    }

    fn clear(&mut self) -> Result<usize, GearError> {
        let removed = self.entries.len();
        self.entries.clear();
        Ok(removed)
    }
}

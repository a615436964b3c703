//! Primary gear list store backed by `SQLite`.

use std::path::PathBuf;
use std::rc::Rc;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::{Database, KeyValueBackend};
use crate::error::GearError;
use crate::sync::{QueueStore, SqliteQueue};

enum Location {
    File(PathBuf),
    Memory,
}

/// Primary backend: one row per user in `gear_lists`.
///
/// The same database holds the sync queue, handed out through
/// [`KeyValueBackend::queue_store`].
pub struct SqliteBackend {
    location: Location,
    db: Option<Rc<Database>>,
}

impl SqliteBackend {
    /// Backend for a database file. Nothing is touched until `open`.
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self {
            location: Location::File(path),
            db: None,
        }
    }

    /// Backend for a private in-memory database.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            db: None,
        }
    }

    fn database(&self) -> Result<&Database, GearError> {
        self.db
            .as_deref()
            .ok_or_else(|| GearError::Database("Database has not been opened".to_string()))
    }
}

impl KeyValueBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn open(&mut self) -> Result<(), GearError> {
        if self.db.is_some() {
            return Ok(());
        }

        let db = match &self.location {
            Location::File(path) => Database::open_at(path)?,
            Location::Memory => Database::open_in_memory()?,
        };
        self.db = Some(Rc::new(db));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, GearError> {
        let conn = self.database()?.connection();

        conn.query_row(
            "SELECT items FROM gear_lists WHERE user_id = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| GearError::Database(format!("Failed to read gear list: {e}")))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), GearError> {
        let conn = self.database()?.connection();

        conn.execute(
            r"INSERT INTO gear_lists (user_id, items, updated_at) VALUES (?1, ?2, ?3)
              ON CONFLICT(user_id) DO UPDATE SET
              items = excluded.items,
              updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| GearError::Database(format!("Failed to write gear list: {e}")))?;

        Ok(())
    }

    fn queue_store(&self) -> Option<Box<dyn QueueStore>> {
        self.db
            .as_ref()
            .map(|db| Box::new(SqliteQueue::with_database(Rc::clone(db))) as Box<dyn QueueStore>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut backend = SqliteBackend::in_memory();
        backend.open().unwrap();

        backend.put("u1", r#"[{"id":1}]"#).unwrap();
        assert_eq!(backend.get("u1").unwrap().as_deref(), Some(r#"[{"id":1}]"#));
        assert_eq!(backend.get("u2").unwrap(), None);
    }

    #[test]
    fn test_put_overwrites() {
        let mut backend = SqliteBackend::in_memory();
        backend.open().unwrap();

        backend.put("u1", "[1]").unwrap();
        backend.put("u1", "[2]").unwrap();

        assert_eq!(backend.get("u1").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_unopened_backend_errors() {
        let mut backend = SqliteBackend::in_memory();

        assert!(backend.get("u1").is_err());
        assert!(backend.put("u1", "[]").is_err());
        assert!(backend.queue_store().is_none());
    }

    #[test]
    fn test_file_backend_persists() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("gear.db");

        {
            let mut backend = SqliteBackend::at(path.clone());
            backend.open().unwrap();
            backend.put("u1", "[]").unwrap();
        }

        let mut backend = SqliteBackend::at(path);
        backend.open().unwrap();
        assert_eq!(backend.get("u1").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_queue_store_shares_database() {
        let mut backend = SqliteBackend::in_memory();
        backend.open().unwrap();

        let queue = backend.queue_store().unwrap();
        assert_eq!(queue.stats().unwrap().pending, 0);
    }

    #[test]
    fn test_open_fails_for_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut backend = SqliteBackend::at(temp_dir.path().to_path_buf());

        assert!(backend.open().is_err());
        assert!(backend.queue_store().is_none());
    }
}

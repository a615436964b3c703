//! Database migrations for gearstash.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::GearError;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, GearError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| GearError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), GearError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| GearError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), GearError> {
    let current = get_version(conn)?;

    if current > CURRENT_VERSION {
        return Err(GearError::Database(format!(
            "Database schema version {current} is newer than supported version {CURRENT_VERSION}"
        )));
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), GearError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(GearError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// - `gear_lists`: one serialized gear list per user
/// - `sync_queue`: outbound changes awaiting delivery
fn migrate_v1(conn: &Connection) -> Result<(), GearError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS gear_lists (
            user_id TEXT PRIMARY KEY,
            items TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sync_queue (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            action TEXT NOT NULL,
            payload TEXT NOT NULL,
            enqueued_at INTEGER NOT NULL,
            retry_count INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_sync_queue_enqueued
        ON sync_queue(enqueued_at);
        ",
    )
    .map_err(|e| GearError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO gear_lists (user_id, items, updated_at) VALUES ('u1', '[]', '2024-01-01T10:00:00Z')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO sync_queue (action, payload, enqueued_at) VALUES ('update', '{}', 1704103200000)",
            [],
        )
        .unwrap();

        let retry_count: i64 = conn
            .query_row("SELECT retry_count FROM sync_queue", [], |row| row.get(0))
            .unwrap();
        assert_eq!(retry_count, 0);
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 7;").unwrap();

        assert!(matches!(run(&conn), Err(GearError::Database(_))));
    }
}

//! Storage layer for gearstash.
//!
//! Gear lists are kept in two tiers behind the same [`KeyValueBackend`]
//! capability:
//! - a primary SQLite database, which also holds the sync queue
//! - a flat fallback cache, written on every save
//!
//! [`MemoryBackend`] is an in-process implementation for embedding and tests.

mod backend;
mod database;
mod fallback;
mod memory;
mod migrations;
mod sqlite;

pub use backend::KeyValueBackend;
pub use database::Database;
pub use fallback::FileCache;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

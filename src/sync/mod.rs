//! Best-effort outbound synchronization.
//!
//! Every local save enqueues a [`SyncQueueEntry`]; a drain pass pushes the
//! pending entries to a remote endpoint in FIFO order. Each entry moves
//! through a small state machine:
//!
//! - push succeeds: the entry is removed
//! - push fails below [`RETRY_CEILING`]: `retry_count` is incremented and
//!   the entry waits for the next drain
//! - push fails at the ceiling: the entry is dropped
//!
//! Sync failures are logged and never surfaced to callers of the store.

mod drain;
mod entry;
mod queue;
mod transport;

pub use drain::{drain, DrainOutcome, DrainReport, EntryResult};
pub use entry::{SyncAction, SyncQueueEntry, Transition, RETRY_CEILING};
pub use queue::{MemoryQueue, QueueStats, QueueStore, SqliteQueue};
pub use transport::{HttpTransport, SyncTransport};

#[cfg(test)]
pub use transport::MockSyncTransport;

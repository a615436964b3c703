//! One delivery pass over the sync queue.

use serde::Serialize;
use tracing::{debug, warn};

use super::entry::{SyncAction, Transition, RETRY_CEILING};
use super::queue::QueueStore;
use super::transport::SyncTransport;
use crate::error::GearError;

/// What happened to an entry during a drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DrainOutcome {
    /// Pushed and removed from the queue
    Delivered,
    /// Push failed; kept for a later drain
    Retrying { retry_count: u32 },
    /// Push failed at the retry ceiling; removed
    Dropped,
}

/// Result for a single entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResult {
    pub id: i64,
    pub action: SyncAction,
    #[serde(flatten)]
    pub outcome: DrainOutcome,
    pub error: Option<String>,
}

/// Result of a drain pass.
#[derive(Debug, Default, Serialize)]
pub struct DrainReport {
    pub delivered: usize,
    pub retrying: usize,
    pub dropped: usize,
    pub results: Vec<EntryResult>,
}

impl DrainReport {
    fn add(&mut self, result: EntryResult) {
        match result.outcome {
            DrainOutcome::Delivered => self.delivered += 1,
            DrainOutcome::Retrying { .. } => self.retrying += 1,
            DrainOutcome::Dropped => self.dropped += 1,
        }
        self.results.push(result);
    }

    /// Number of entries processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.delivered + self.retrying + self.dropped
    }
}

/// Push every pending entry once, oldest first.
///
/// The pending set is read once up front; entries enqueued while the pass
/// runs wait for the next drain.
///
/// # Errors
///
/// Returns an error if the queue itself cannot be read or updated. Push
/// failures are not errors; they show up in the report.
pub fn drain(
    queue: &mut dyn QueueStore,
    transport: &dyn SyncTransport,
) -> Result<DrainReport, GearError> {
    let snapshot = queue.pending()?;
    let mut report = DrainReport::default();

    for entry in snapshot {
        let Some(id) = entry.id else {
            continue;
        };

        match transport.push(&entry) {
            Ok(()) => {
                queue.remove(id)?;
                debug!(id, action = %entry.action, "sync entry delivered");
                report.add(EntryResult {
                    id,
                    action: entry.action,
                    outcome: DrainOutcome::Delivered,
                    error: None,
                });
            },
            Err(e) => {
                let outcome = match entry.after_failure() {
                    Transition::Retry { retry_count } => {
                        queue.record_failure(id)?;
                        warn!(id, retry_count, error = %e, "sync push failed, will retry");
                        DrainOutcome::Retrying { retry_count }
                    },
                    Transition::Drop => {
                        queue.remove(id)?;
                        warn!(
                            id,
                            error = %e,
                            "dropping sync entry after {RETRY_CEILING} failed attempts"
                        );
                        DrainOutcome::Dropped
                    },
                };

                report.add(EntryResult {
                    id,
                    action: entry.action,
                    outcome,
                    error: Some(e.to_string()),
                });
            },
        }
    }

    Ok(report)
}

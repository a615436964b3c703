//! Sync queue entries and their retry transitions.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GearError;
use crate::gear::GearItem;

/// Maximum number of failed delivery attempts before an entry is dropped.
pub const RETRY_CEILING: u32 = 3;

/// Kind of change carried by a queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Create,
    Update,
    Delete,
}

impl SyncAction {
    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Parse a stored action name.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names.
    pub fn parse(s: &str) -> Result<Self, GearError> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(GearError::Parse(format!("Unknown sync action: {other}"))),
        }
    }
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to an entry after a failed push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep the entry with the new retry count.
    Retry { retry_count: u32 },
    /// The ceiling is reached; discard the entry.
    Drop,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GearListPayload<'a> {
    user_id: &'a str,
    gear_list: &'a [GearItem],
}

/// An outbound change waiting for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncQueueEntry {
    /// Sequence number, assigned by the queue on enqueue.
    pub id: Option<i64>,
    pub action: SyncAction,
    /// Snapshot sent as the request `data`.
    pub payload: serde_json::Value,
    pub enqueued_at: DateTime<Utc>,
    /// Failed delivery attempts so far. Never decreases.
    pub retry_count: u32,
}

impl SyncQueueEntry {
    /// Create a fresh entry stamped with the current time.
    #[must_use]
    pub fn new(action: SyncAction, payload: serde_json::Value) -> Self {
        Self {
            id: None,
            action,
            payload,
            enqueued_at: Utc::now(),
            retry_count: 0,
        }
    }

    /// Entry announcing the full gear list of a user after a save.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be serialized.
    pub fn gear_list_update(user_id: &str, items: &[GearItem]) -> Result<Self, GearError> {
        let payload = serde_json::to_value(GearListPayload {
            user_id,
            gear_list: items,
        })?;
        Ok(Self::new(SyncAction::Update, payload))
    }

    /// Enqueue time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.enqueued_at.timestamp_millis()
    }

    /// Rebuild an enqueue time from stored milliseconds.
    #[must_use]
    pub fn time_from_millis(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Transition to apply when a push of this entry fails.
    #[must_use]
    pub const fn after_failure(&self) -> Transition {
        let failures = self.retry_count + 1;
        if failures >= RETRY_CEILING {
            Transition::Drop
        } else {
            Transition::Retry {
                retry_count: failures,
            }
        }
    }
}

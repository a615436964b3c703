//! JSON output formatting for gearstash.

use serde::Serialize;
use serde_json::json;

use crate::error::GearError;
use crate::gear::{GearItem, PackingList, WeightSummary};
use crate::sync::QueueStats;

/// Format a gear list as JSON
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_gear_list_json(user_id: &str, items: &[GearItem]) -> Result<String, GearError> {
    let output = json!({
        "user": user_id,
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a weight summary as JSON
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_summary_json(user_id: &str, summary: &WeightSummary) -> Result<String, GearError> {
    let output = json!({
        "user": user_id,
        "total_kg": summary.total_kg,
        "categories": summary.categories,
        "unparsed": summary.unparsed
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a packing list's weight summary as JSON
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_packing_summary_json(list: &PackingList) -> Result<String, GearError> {
    let summary = list.summary();
    let output = json!({
        "list": list.name,
        "item_count": list.item_count(),
        "total_kg": summary.total_kg,
        "categories": summary.categories,
        "unparsed": summary.unparsed
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format queue statistics as JSON
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_queue_stats_json(stats: &QueueStats, fallback_only: bool) -> Result<String, GearError> {
    let output = json!({
        "pending": stats.pending,
        "oldest_pending": stats.oldest_pending.map(|t| t.to_rfc3339()),
        "fallback_only": fallback_only
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, GearError> {
    Ok(serde_json::to_string_pretty(value)?)
}

//! Output formatting for gearstash.
//!
//! This module provides formatters for displaying gear lists, packing
//! lists, weight summaries and sync queue state in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::GearError;
use crate::gear::{GearItem, PackingList, WeightSummary};
use crate::sync::{DrainReport, QueueStats};

pub use json::*;
pub use pretty::*;

/// Format a user's gear list based on output format
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_gear_list(
    user_id: &str,
    items: &[GearItem],
    format: OutputFormat,
) -> Result<String, GearError> {
    match format {
        OutputFormat::Pretty => Ok(format_gear_list_pretty(user_id, items)),
        OutputFormat::Json => format_gear_list_json(user_id, items),
    }
}

/// Format a weight summary based on output format
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_summary(
    user_id: &str,
    summary: &WeightSummary,
    format: OutputFormat,
) -> Result<String, GearError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(user_id, summary)),
        OutputFormat::Json => format_summary_json(user_id, summary),
    }
}

/// Format a packing list based on output format
///
/// JSON output is the list itself, so it can be read back by `pack summary`.
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_packing_list(list: &PackingList, format: OutputFormat) -> Result<String, GearError> {
    match format {
        OutputFormat::Pretty => Ok(format_packing_list_pretty(list)),
        OutputFormat::Json => to_json(list),
    }
}

/// Format a packing list's quantity-weighted summary based on output format
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_packing_summary(list: &PackingList, format: OutputFormat) -> Result<String, GearError> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{}\n{}",
            format_packing_list_pretty(list),
            format_summary_pretty(&list.name, &list.summary())
        )),
        OutputFormat::Json => format_packing_summary_json(list),
    }
}

/// Format sync queue statistics based on output format
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_queue_stats(
    stats: &QueueStats,
    fallback_only: bool,
    format: OutputFormat,
) -> Result<String, GearError> {
    match format {
        OutputFormat::Pretty => Ok(format_queue_stats_pretty(stats, fallback_only)),
        OutputFormat::Json => format_queue_stats_json(stats, fallback_only),
    }
}

/// Format a drain report based on output format
///
/// # Errors
///
/// Returns `GearError::Parse` if JSON serialization fails.
pub fn format_drain_report(report: &DrainReport, format: OutputFormat) -> Result<String, GearError> {
    match format {
        OutputFormat::Pretty => Ok(format_drain_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

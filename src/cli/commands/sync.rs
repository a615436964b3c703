//! Sync queue command implementation.

use serde_json::json;

use crate::cli::args::{OutputFormat, SyncCommands};
use crate::error::GearError;
use crate::output::{format_drain_report, format_queue_stats, to_json};
use crate::store::GearStore;

/// Execute sync subcommands.
///
/// # Errors
///
/// Returns an error if the queue cannot be read or updated.
pub fn sync(
    store: &mut GearStore,
    cmd: SyncCommands,
    format: OutputFormat,
) -> Result<String, GearError> {
    match cmd {
        SyncCommands::Status => {
            let stats = store.queue_stats()?;
            format_queue_stats(&stats, store.is_fallback_only(), format)
        },
        SyncCommands::Run => {
            let report = store.drain_sync_queue()?;
            format_drain_report(&report, format)
        },
        SyncCommands::Clear { force } => clear(store, force, format),
    }
}

fn clear(store: &mut GearStore, force: bool, format: OutputFormat) -> Result<String, GearError> {
    if !force {
        return Err(GearError::Validation(
            "Use --force to discard all pending sync entries".to_string(),
        ));
    }

    let cleared = store.clear_sync_queue()?;

    match format {
        OutputFormat::Json => to_json(&json!({"cleared": cleared})),
        OutputFormat::Pretty => Ok(format!("Cleared {cleared} entries from the sync queue")),
    }
}

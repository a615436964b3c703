//! Gear list commands.
//!
//! `add` and `remove` read the current list, change it and save it back
//! whole; the store only knows about complete lists.

use std::io::Read;
use std::path::Path;

use serde_json::json;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::error::GearError;
use crate::gear::{next_item_id, GearItem, WeightSummary};
use crate::output::{format_gear_list, format_summary, to_json};
use crate::store::GearStore;

/// Show a user's gear list.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn list(store: &GearStore, user: &str, format: OutputFormat) -> Result<String, GearError> {
    let items = store.get_gear_list(user);
    format_gear_list(user, &items, format)
}

/// Replace a user's gear list from a JSON file, or stdin when `file` is `None`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the save fails.
pub fn save(
    store: &mut GearStore,
    user: &str,
    file: Option<&Path>,
    format: OutputFormat,
) -> Result<String, GearError> {
    match file {
        Some(path) => {
            let handle = std::fs::File::open(path).map_err(|e| {
                GearError::NotFound(format!("Cannot open {}: {e}", path.display()))
            })?;
            save_from_reader(store, user, handle, format)
        },
        None => save_from_reader(store, user, std::io::stdin().lock(), format),
    }
}

/// Replace a user's gear list with a JSON array read from `reader`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the save fails.
pub fn save_from_reader(
    store: &mut GearStore,
    user: &str,
    mut reader: impl Read,
    format: OutputFormat,
) -> Result<String, GearError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    let items: Vec<GearItem> = serde_json::from_str(&contents)
        .map_err(|e| GearError::Parse(format!("Invalid gear list: {e}")))?;

    store.save_gear_list(user, &items)?;

    match format {
        OutputFormat::Json => to_json(&json!({"user": user, "saved": items.len()})),
        OutputFormat::Pretty => Ok(format!("Saved {} items for {user}", items.len())),
    }
}

/// Append one item to a user's gear list.
///
/// # Errors
///
/// Returns `GearError::Validation` if the id is already used, or an error
/// if the save fails.
pub fn add(store: &mut GearStore, args: AddArgs, format: OutputFormat) -> Result<String, GearError> {
    let mut items = store.get_gear_list(&args.user);

    let id = args.id.unwrap_or_else(|| next_item_id(&items));
    if items.iter().any(|item| item.id == id) {
        return Err(GearError::Validation(format!(
            "Item #{id} already exists for {}",
            args.user
        )));
    }

    let item = GearItem::new(id, args.name, args.weight, args.category);
    items.push(item.clone());
    store.save_gear_list(&args.user, &items)?;

    match format {
        OutputFormat::Json => to_json(&item),
        OutputFormat::Pretty => Ok(format!(
            "Added #{} {} ({}) to {}",
            item.id, item.name, item.weight, args.user
        )),
    }
}

/// Remove an item from a user's gear list.
///
/// # Errors
///
/// Returns `GearError::NotFound` if there is no such item, or an error if
/// the save fails.
pub fn remove(
    store: &mut GearStore,
    user: &str,
    id: i64,
    format: OutputFormat,
) -> Result<String, GearError> {
    let mut items = store.get_gear_list(user);

    let position = items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| GearError::NotFound(format!("Item #{id} not found for {user}")))?;
    let removed = items.remove(position);

    store.save_gear_list(user, &items)?;

    match format {
        OutputFormat::Json => to_json(&removed),
        OutputFormat::Pretty => Ok(format!("Removed #{} {} from {user}", removed.id, removed.name)),
    }
}

/// Show the weight summary of a user's gear list.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn summary(store: &GearStore, user: &str, format: OutputFormat) -> Result<String, GearError> {
    let items = store.get_gear_list(user);
    format_summary(user, &WeightSummary::from_items(&items), format)
}

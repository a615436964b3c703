//! Packing list commands.

use std::io::Read;

use crate::cli::args::{OutputFormat, PackCommands};
use crate::error::GearError;
use crate::gear::PackingList;
use crate::output::{format_packing_list, format_packing_summary};
use crate::store::GearStore;

/// Run a packing list subcommand.
///
/// # Errors
///
/// Returns an error if the subcommand fails.
pub fn pack(
    store: &GearStore,
    command: PackCommands,
    format: OutputFormat,
) -> Result<String, GearError> {
    match command {
        PackCommands::New {
            user,
            name,
            items,
            id,
        } => new_list(store, &user, id, &name, &items, format),
        PackCommands::Summary { file } => match file {
            Some(path) => {
                let handle = std::fs::File::open(&path).map_err(|e| {
                    GearError::NotFound(format!("Cannot open {}: {e}", path.display()))
                })?;
                summary_from_reader(handle, format)
            },
            None => summary_from_reader(std::io::stdin().lock(), format),
        },
    }
}

/// Build a packing list from picks against a user's gear list.
///
/// # Errors
///
/// Returns `GearError::Validation` for a malformed pick and
/// `GearError::NotFound` for a gear id the user does not have.
pub fn new_list(
    store: &GearStore,
    user: &str,
    id: i64,
    name: &str,
    picks: &[String],
    format: OutputFormat,
) -> Result<String, GearError> {
    let picks = picks
        .iter()
        .map(|pick| parse_pick(pick))
        .collect::<Result<Vec<_>, _>>()?;

    let gear = store.get_gear_list(user);
    let list = PackingList::from_picks(id, name, &gear, &picks)
        .map_err(|e| match e {
            GearError::NotFound(msg) => GearError::NotFound(format!("{msg} for {user}")),
            other => other,
        })?;

    format_packing_list(&list, format)
}

/// Show the weight summary of a packing list read from `reader`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a packing list.
pub fn summary_from_reader(mut reader: impl Read, format: OutputFormat) -> Result<String, GearError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    let list: PackingList = serde_json::from_str(&contents)
        .map_err(|e| GearError::Parse(format!("Invalid packing list: {e}")))?;

    format_packing_summary(&list, format)
}

/// Parse `ID` or `ID:QUANTITY`.
fn parse_pick(pick: &str) -> Result<(i64, u32), GearError> {
    let invalid = || GearError::Validation(format!("Invalid pick '{pick}', expected ID or ID:QTY"));

    let (id, quantity) = match pick.split_once(':') {
        Some((id, quantity)) => (id, quantity.trim().parse().map_err(|_| invalid())?),
        None => (pick, 1),
    };
    let id = id.trim().parse().map_err(|_| invalid())?;

    Ok((id, quantity))
}

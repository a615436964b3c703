//! Command implementations for gearstash.
//!
//! Each command works against an initialized [`GearStore`] and returns the
//! text to print. `config` works on the settings file instead.

mod config;
mod gear;
mod pack;
mod sync;

pub use config::config;
pub use gear::{add, list, remove, save, save_from_reader, summary};
pub use pack::{new_list, pack, summary_from_reader};
pub use sync::sync;

use crate::cli::args::{Commands, OutputFormat};
use crate::config::Paths;
use crate::error::GearError;
use crate::store::GearStore;

/// Run a parsed command.
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn dispatch(
    store: &mut GearStore,
    paths: &Paths,
    command: Commands,
    format: OutputFormat,
) -> Result<String, GearError> {
    match command {
        Commands::List { user } => list(store, &user, format),
        Commands::Save { user, file } => save(store, &user, file.as_deref(), format),
        Commands::Add(args) => add(store, args, format),
        Commands::Remove { user, id } => remove(store, &user, id, format),
        Commands::Summary { user } => summary(store, &user, format),
        Commands::Pack(args) => pack(store, args.command, format),
        Commands::Config(args) => config(paths, args.command, format),
        Commands::Sync(args) => sync(store, args.command, format),
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "gearstash")]
#[command(about = "Track hiking gear lists locally with best-effort remote sync")]
#[command(long_about = "gearstash - local gear list store

Gear lists are saved per user to a local SQLite database and mirrored to a
fallback cache file. Every save queues a sync entry that is pushed to the
configured endpoint; entries that fail three times are dropped.

QUICK START:
  gearstash add alice --name Tent --weight \"2.5 kg\" --category Shelter
  gearstash list alice
  gearstash summary alice
  gearstash sync status

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Base URL of the sync endpoint (overrides config.yaml)
    #[arg(long, env = "GEARSTASH_SYNC_URL", global = true)]
    pub sync_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a user's gear list
    #[command(visible_alias = "ls")]
    List {
        /// User id
        user: String,
    },

    /// Replace a user's gear list with a JSON array
    ///
    /// Reads `[{"id":1,"name":"Tent","weight":"2.5 kg","category":"Shelter"}]`
    /// from the given file, or from stdin when no file is given.
    Save {
        /// User id
        user: String,

        /// JSON file with the gear list
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Add one item to a user's gear list
    Add(AddArgs),

    /// Remove an item from a user's gear list
    #[command(visible_alias = "rm")]
    Remove {
        /// User id
        user: String,

        /// Item id
        id: i64,
    },

    /// Show total and per-category weight
    Summary {
        /// User id
        user: String,
    },

    /// Packing lists built from a user's gear
    ///
    /// # Subcommands
    ///
    ///   new       Pick gear with quantities into a packing list
    ///   summary   Show a packing list's weight, counting quantities
    Pack(PackArgs),

    /// Show or change settings in config.yaml
    ///
    /// # Subcommands
    ///
    ///   show             Print the effective settings
    ///   set-endpoint     Store the sync endpoint
    ///   clear-endpoint   Remove the sync endpoint
    Config(ConfigArgs),

    /// Sync queue management
    ///
    /// # Subcommands
    ///
    ///   status   Show pending entries
    ///   run      Push pending entries once
    ///   clear    Discard pending entries
    Sync(SyncArgs),
}

/// Arguments for `add`.
#[derive(Args)]
pub struct AddArgs {
    /// User id
    pub user: String,

    /// Item name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Weight label, e.g. "2.5 kg"
    #[arg(long, short = 'w')]
    pub weight: String,

    /// Category, e.g. Shelter
    #[arg(long, short = 'c')]
    pub category: String,

    /// Item id (defaults to one past the largest id in the list)
    #[arg(long)]
    pub id: Option<i64>,
}

#[derive(Args)]
pub struct PackArgs {
    #[command(subcommand)]
    pub command: PackCommands,
}

/// Packing list subcommands.
#[derive(Subcommand)]
pub enum PackCommands {
    /// Build a packing list from a user's gear list
    ///
    /// Picks are gear ids with an optional quantity, e.g. `--item 1 --item 3:2`.
    New {
        /// User id
        user: String,

        /// Packing list name
        #[arg(long, short = 'n')]
        name: String,

        /// Gear to pack as ID or ID:QUANTITY
        #[arg(long = "item", short = 'i', value_name = "ID[:QTY]", required = true)]
        items: Vec<String>,

        /// Packing list id
        #[arg(long, default_value_t = 1)]
        id: i64,
    },

    /// Show total and per-category weight of a packing list
    ///
    /// Reads a packing list in the JSON shape `pack new -o json` prints,
    /// from the given file or from stdin.
    Summary {
        /// JSON file with the packing list
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings
    Show,

    /// Store the sync endpoint base URL
    SetEndpoint {
        /// Base URL; entries are posted to `{url}/sync`
        url: String,
    },

    /// Remove the stored sync endpoint
    ClearEndpoint,
}

#[derive(Args)]
pub struct SyncArgs {
    #[command(subcommand)]
    pub command: SyncCommands,
}

/// Sync queue subcommands.
#[derive(Subcommand)]
pub enum SyncCommands {
    /// Show sync queue status
    Status,

    /// Push every pending entry once
    ///
    /// Failed entries have their retry count incremented; entries at the
    /// retry ceiling are dropped.
    Run,

    /// Discard all pending entries
    Clear {
        /// Confirm discarding every pending entry
        #[arg(long)]
        force: bool,
    },
}

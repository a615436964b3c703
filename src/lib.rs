//! gearstash - local gear list store
//!
//! This crate keeps hiking gear lists per user in a local SQLite database,
//! mirrors every save into a fallback cache, and pushes changes to a remote
//! endpoint through a bounded-retry sync queue.
//!
//! ```no_run
//! use gearstash::config::{Config, Paths};
//! use gearstash::gear::GearItem;
//! use gearstash::GearStore;
//!
//! let paths = Paths::new()?;
//! paths.ensure_dirs()?;
//! let mut store = GearStore::from_config(&paths, &Config::load()?);
//! store.initialize();
//!
//! store.save_gear_list("alice", &[GearItem::new(1, "Tent", "2.5 kg", "Shelter")])?;
//! assert_eq!(store.get_gear_list("alice").len(), 1);
//! # Ok::<(), gearstash::GearError>(())
//! ```

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod gear;
pub mod logging;
pub mod output;
pub mod storage;
pub mod store;
pub mod sync;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::GearError;
pub use store::GearStore;

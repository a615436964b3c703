//! Gear list data model.
//!
//! A gear list is an ordered sequence of [`GearItem`]s stored per user.
//! A [`PackingList`] picks items from it with quantities for one trip.
//! Weights are free-form labels such as `"2.5 kg"`; [`weight`] turns them
//! into numbers for summaries.

mod packing;
mod types;
pub mod weight;

pub use packing::{ListItem, PackingList};
pub use types::{next_item_id, GearItem};
pub use weight::{parse_weight_kg, CategoryWeight, WeightSummary};

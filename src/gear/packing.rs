//! Packing lists.
//!
//! A packing list picks gear for one trip. Each entry carries a copy of the
//! gear item plus how many of it go in the pack, and weights count once per
//! unit.

use serde::{Deserialize, Serialize};

use super::{GearItem, WeightSummary};
use crate::error::GearError;

/// A gear item on a packing list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(flatten)]
    pub item: GearItem,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Gear picked for a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingList {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

impl PackingList {
    /// Create an empty packing list.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Build a list from `(gear id, quantity)` picks out of a gear list.
    ///
    /// # Errors
    ///
    /// Returns `GearError::NotFound` for an id missing from `gear` and
    /// `GearError::Validation` for a zero quantity.
    pub fn from_picks(
        id: i64,
        name: impl Into<String>,
        gear: &[GearItem],
        picks: &[(i64, u32)],
    ) -> Result<Self, GearError> {
        let mut list = Self::new(id, name);

        for &(gear_id, quantity) in picks {
            let item = gear
                .iter()
                .find(|item| item.id == gear_id)
                .ok_or_else(|| GearError::NotFound(format!("Gear item #{gear_id} not found")))?;
            list.add_item(item.clone(), quantity)?;
        }

        Ok(list)
    }

    /// Add gear to the list. Adding an item already on the list raises its
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns `GearError::Validation` if `quantity` is zero.
    pub fn add_item(&mut self, item: GearItem, quantity: u32) -> Result<(), GearError> {
        if quantity == 0 {
            return Err(GearError::Validation(format!(
                "Quantity for {} must be at least 1",
                item.name
            )));
        }

        match self.items.iter_mut().find(|entry| entry.item.id == item.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.items.push(ListItem { item, quantity }),
        }
        Ok(())
    }

    /// Number of units packed.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|entry| entry.quantity).sum()
    }

    /// Weight summary with every item counted `quantity` times.
    #[must_use]
    pub fn summary(&self) -> WeightSummary {
        WeightSummary::from_weighted(
            self.items
                .iter()
                .map(|entry| (&entry.item, entry.quantity)),
        )
    }

    /// Total packed weight in kilograms.
    #[must_use]
    pub fn total_weight_kg(&self) -> f64 {
        self.summary().total_kg
    }
}

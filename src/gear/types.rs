//! Gear item type.

use serde::{Deserialize, Serialize};

use super::weight::parse_weight_kg;

/// A single piece of gear.
///
/// The id identifies the item within one user's list. The store does not
/// enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearItem {
    pub id: i64,
    pub name: String,
    /// Weight label with the unit embedded, e.g. `"2.5 kg"`.
    pub weight: String,
    pub category: String,
}

impl GearItem {
    /// Create a new gear item.
    #[must_use]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        weight: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            weight: weight.into(),
            category: category.into(),
        }
    }

    /// Weight in kilograms, if the label can be parsed.
    #[must_use]
    pub fn weight_kg(&self) -> Option<f64> {
        parse_weight_kg(&self.weight)
    }
}

/// Next free id for a list: one past the largest id in use.
#[must_use]
pub fn next_item_id(items: &[GearItem]) -> i64 {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

//! Weight label parsing and per-category weight summaries.
//!
//! Labels are free text (`"2.5 kg"`, `"800g"`, `"3 lb"`). The first number
//! in the label is taken and scaled by the unit that follows it; a label
//! without a recognized unit is read as kilograms. A comma inside the number
//! is a decimal separator (`"1,5 kg"`), never a thousands separator.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::GearItem;

const GRAMS_PER_KG: f64 = 1000.0;
const KG_PER_LB: f64 = 0.453_592_37;
const KG_PER_OZ: f64 = 0.028_349_523_125;

static WEIGHT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d+(?:[.,]\d+)?|[.,]\d+)\s*(kilograms?|kilos?|kgs?|grams?|gr|g|pounds?|lbs?|ounces?|oz)?\b",
    )
    .unwrap_or_else(|e| panic!("Invalid weight regex: {e}"))
});

/// Parse a weight label into kilograms.
///
/// Returns `None` when the label contains no number.
#[must_use]
pub fn parse_weight_kg(label: &str) -> Option<f64> {
    let caps = WEIGHT_PATTERN.captures(label)?;
    let value: f64 = caps.get(1)?.as_str().replace(',', ".").parse().ok()?;

    let unit = caps.get(2).map(|m| m.as_str().to_lowercase());
    let kg = match unit.as_deref() {
        Some("g" | "gr" | "gram" | "grams") => value / GRAMS_PER_KG,
        Some("lb" | "lbs" | "pound" | "pounds") => value * KG_PER_LB,
        Some("oz" | "ounce" | "ounces") => value * KG_PER_OZ,
        _ => value,
    };

    Some(kg)
}

/// Weight of one category within a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWeight {
    pub category: String,
    pub weight_kg: f64,
    /// Share of the total weight, 0-100.
    pub percentage: f64,
}

/// Total and per-category weight of a gear list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSummary {
    pub total_kg: f64,
    /// Categories in the order they first appear in the list.
    pub categories: Vec<CategoryWeight>,
    /// Ids of items whose weight label could not be parsed.
    pub unparsed: Vec<i64>,
}

impl WeightSummary {
    /// Build a summary from a gear list.
    #[must_use]
    pub fn from_items(items: &[GearItem]) -> Self {
        Self::from_weighted(items.iter().map(|item| (item, 1)))
    }

    /// Build a summary from items paired with how many of each are carried.
    #[must_use]
    pub fn from_weighted<'a>(items: impl IntoIterator<Item = (&'a GearItem, u32)>) -> Self {
        let mut categories: Vec<CategoryWeight> = Vec::new();
        let mut unparsed = Vec::new();

        for (item, quantity) in items {
            let Some(unit_kg) = item.weight_kg() else {
                unparsed.push(item.id);
                continue;
            };
            let kg = unit_kg * f64::from(quantity);

            match categories.iter_mut().find(|c| c.category == item.category) {
                Some(existing) => existing.weight_kg += kg,
                None => categories.push(CategoryWeight {
                    category: item.category.clone(),
                    weight_kg: kg,
                    percentage: 0.0,
                }),
            }
        }

        let total_kg: f64 = categories.iter().map(|c| c.weight_kg).sum();
        if total_kg > 0.0 {
            for category in &mut categories {
                category.percentage = category.weight_kg / total_kg * 100.0;
            }
        }

        Self {
            total_kg,
            categories,
            unparsed,
        }
    }

    /// Check if the summary has no weighed items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_kilograms() {
        assert_eq!(parse_weight_kg("2.5 kg"), Some(2.5));
        assert_eq!(parse_weight_kg("1.2kg"), Some(1.2));
        assert_eq!(parse_weight_kg("3 KG"), Some(3.0));
    }

    #[test]
    fn test_parse_other_units() {
        assert_eq!(parse_weight_kg("800 g"), Some(0.8));
        assert!(approx(parse_weight_kg("2 lb").unwrap(), 0.907_184_74));
        assert!(approx(parse_weight_kg("2 lbs").unwrap(), 0.907_184_74));
        assert!(approx(parse_weight_kg("16 oz").unwrap(), 0.453_592_37));
    }

    #[test]
    fn test_parse_comma_decimal_and_long_units() {
        assert_eq!(parse_weight_kg("1,5 kg"), Some(1.5));
        assert_eq!(parse_weight_kg("0,8kg"), Some(0.8));
        assert_eq!(parse_weight_kg("500gr"), Some(0.5));
        assert_eq!(parse_weight_kg("250 grams"), Some(0.25));
        assert_eq!(parse_weight_kg("3 kgs"), Some(3.0));
        assert!(approx(parse_weight_kg("1 pound").unwrap(), KG_PER_LB));
        assert!(approx(parse_weight_kg("2 ounces").unwrap(), 2.0 * KG_PER_OZ));
    }

    #[test]
    fn test_parse_without_unit_is_kilograms() {
        assert_eq!(parse_weight_kg("1.75"), Some(1.75));
        assert_eq!(parse_weight_kg("about 2 kilos"), Some(2.0));
    }

    #[test]
    fn test_parse_no_number() {
        assert_eq!(parse_weight_kg(""), None);
        assert_eq!(parse_weight_kg("light"), None);
    }

    #[test]
    fn test_summary_groups_by_category() {
        let items = vec![
            GearItem::new(1, "Tent", "2.5 kg", "Shelter"),
            GearItem::new(2, "Sleeping Bag", "1.2 kg", "Sleep System"),
            GearItem::new(3, "Tarp", "500 g", "Shelter"),
            GearItem::new(4, "Lucky charm", "n/a", "Misc"),
        ];

        let summary = WeightSummary::from_items(&items);

        assert!(approx(summary.total_kg, 4.2));
        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.categories[0].category, "Shelter");
        assert!(approx(summary.categories[0].weight_kg, 3.0));
        assert!(approx(summary.categories[0].percentage, 3.0 / 4.2 * 100.0));
        assert_eq!(summary.categories[1].category, "Sleep System");
        assert_eq!(summary.unparsed, vec![4]);
    }

    #[test]
    fn test_summary_empty() {
        let summary = WeightSummary::from_items(&[]);
        assert!(summary.is_empty());
        assert!(approx(summary.total_kg, 0.0));
    }
}

//! Filter Models
//!
//! The user-chosen display criteria for the product grid.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Ordering applied after all filters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Catalog order
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

/// Complete set of display criteria.
///
/// Zero prices and an empty category set or query mean "no constraint", so
/// `FilterSpec::default()` is the cleared state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Selected categories; empty keeps every category
    pub categories: BTreeSet<String>,

    /// Inclusive lower bound, ignored when 0
    pub min_price: f64,

    /// Inclusive upper bound, ignored when 0
    pub max_price: f64,

    /// Case-insensitive substring matched against product titles
    pub search_query: String,

    pub sort_by: SortMode,
}

impl FilterSpec {
    /// Selects or deselects a category checkbox.
    pub fn toggle_category(&mut self, category: &str, checked: bool) {
        if checked {
            self.categories.insert(category.to_string());
        } else {
            self.categories.remove(category);
        }
    }

    /// True when no criterion is active and the sort keeps catalog order.
    pub fn is_identity(&self) -> bool {
        self.categories.is_empty()
            && price_bound(self.min_price) <= 0.0
            && price_bound(self.max_price) <= 0.0
            && self.search_query.is_empty()
            && self.sort_by == SortMode::Default
    }
}

/// Maps a price bound onto the filter's domain: anything that is not a
/// finite positive number is "unbounded" (0).
pub fn price_bound(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parses a price input box. Empty or unparsable input means "unbounded" (0).
pub fn parse_price_input(input: &str) -> f64 {
    input.trim().parse::<f64>().map_or(0.0, price_bound)
}

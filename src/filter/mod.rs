//! Product Filter Module
//!
//! Client-side filtering and sorting of the product grid:
//! - Filter models (FilterSpec, SortMode, price input parsing)
//! - The pure filter/sort pipeline

pub mod models;
pub mod pipeline;

pub use models::{parse_price_input, price_bound, FilterSpec, SortMode};
pub use pipeline::apply_filters;

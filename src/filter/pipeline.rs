//! The filter/sort pipeline behind the product grid.

use super::models::{price_bound, FilterSpec, SortMode};
use crate::catalog::Product;

/// Derives the displayed products from the full catalog.
///
/// Stages run in a fixed order: category, minimum price, maximum price,
/// title search, then sort. Sorting is stable, so equal prices keep their
/// catalog order. The function is pure and idempotent.
pub fn apply_filters(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let query = spec.search_query.to_lowercase();
    let min_price = price_bound(spec.min_price);
    let max_price = price_bound(spec.max_price);

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| spec.categories.is_empty() || spec.categories.contains(&p.category))
        .filter(|p| min_price <= 0.0 || p.price >= min_price)
        .filter(|p| max_price <= 0.0 || p.price <= max_price)
        .filter(|p| query.is_empty() || p.title.to_lowercase().contains(&query))
        .cloned()
        .collect();

    match spec.sort_by {
        SortMode::Default => {}
        SortMode::PriceAsc => result.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => result.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    result
}

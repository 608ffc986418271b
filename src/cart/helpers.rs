//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for cart totals and formatting.

use super::models::{CartItem, CartSummary};
use super::store::CartStore;

/// Builds the order summary shown on the cart page.
///
/// Shipping is free; tax is `subtotal * tax_rate`.
pub fn summarize(cart: &CartStore, tax_rate: f64) -> CartSummary {
    let items = cart.items();
    let subtotal: f64 = items.iter().map(CartItem::line_total).sum();
    let total_items = items.iter().map(|i| u64::from(i.quantity)).sum();
    let tax = subtotal * tax_rate;

    CartSummary {
        items,
        total_items,
        subtotal,
        shipping: 0.0,
        tax,
        total: subtotal + tax,
    }
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x Backpack, 1x Hard Drive"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.title))
        .collect::<Vec<_>>()
        .join(", ")
}

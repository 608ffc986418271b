//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for add-to-cart requests
fn default_quantity() -> i64 {
    1
}

/// One line of the cart: a product id plus its aggregated quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product identifier, unique within the cart
    pub id: u64,

    pub title: String,

    /// Unit price captured when the product was first added
    pub price: f64,

    /// Always at least 1
    pub quantity: u32,

    pub image: String,
}

impl CartItem {
    /// Snapshots a product into a new line.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            quantity,
            image: product.image.clone(),
        }
    }

    /// `price * quantity` for this line
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Input for `POST /cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    /// Catalog id of the product to add
    pub product_id: u64,

    /// Quantity to add (defaults to 1, values below 1 are clamped to 1)
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Input for `PUT /cart/items/{id}`
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    /// New exact quantity; values below 1 leave the line untouched
    pub quantity: i64,
}

/// Everything the cart page renders: lines plus derived totals
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub subtotal: f64,
    /// Shipping is always free
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

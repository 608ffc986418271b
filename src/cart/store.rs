//! Shopping Cart State Management
//!
//! The cart store is the single source of truth for one session's cart.
//! Every mutation replaces the whole line list in one step and publishes it
//! to subscribers, so readers never observe a half-applied update.

use tokio::sync::watch;
use tracing::{debug, trace};

use super::models::CartItem;
use crate::catalog::Product;

/// Normalizes an add-to-cart quantity: anything below 1 becomes 1.
fn clamp_add_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

/// In-memory cart for the lifetime of a browsing session.
///
/// Quantity policies:
/// - [`CartStore::add_item`] clamps quantities below 1 up to 1.
/// - [`CartStore::update_quantity`] ignores quantities below 1.
/// - Removing or updating an unknown id is a no-op.
#[derive(Debug)]
pub struct CartStore {
    items: watch::Sender<Vec<CartItem>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Creates an empty cart
    pub fn new() -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self { items }
    }

    /// Receives a fresh snapshot after every effective mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.items.subscribe()
    }

    /// Current lines, in insertion order
    pub fn items(&self) -> Vec<CartItem> {
        self.items.borrow().clone()
    }

    /// Looks up a single line by product id
    pub fn item(&self, id: u64) -> Option<CartItem> {
        self.items.borrow().iter().find(|i| i.id == id).cloned()
    }

    /// Adds `quantity` of `product`, merging into an existing line if there
    /// is one. Returns the resulting line.
    pub fn add_item(&self, product: &Product, quantity: i64) -> CartItem {
        let mut line = CartItem::from_product(product, clamp_add_quantity(quantity));

        self.items.send_modify(|items| {
            match items.iter_mut().find(|i| i.id == product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                    line = existing.clone();
                }
                None => items.push(line.clone()),
            }
        });

        debug!(id = line.id, quantity = line.quantity, "cart line updated");
        line
    }

    /// Removes the line for `id`, returning it if it existed.
    pub fn remove_item(&self, id: u64) -> Option<CartItem> {
        let mut removed = None;
        self.items.send_if_modified(|items| {
            let position = items.iter().position(|i| i.id == id);
            removed = position.map(|p| items.remove(p));
            removed.is_some()
        });

        if removed.is_none() {
            trace!(id, "remove ignored, no such cart line");
        }
        removed
    }

    /// Sets the quantity of an existing line exactly.
    ///
    /// Returns `false` without touching anything when `quantity < 1` or no
    /// line exists for `id`.
    pub fn update_quantity(&self, id: u64, quantity: i64) -> bool {
        if quantity < 1 {
            trace!(id, quantity, "quantity update ignored");
            return false;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut found = false;
        self.items.send_if_modified(|items| {
            let Some(line) = items.iter_mut().find(|i| i.id == id) else {
                return false;
            };
            found = true;
            let changed = line.quantity != quantity;
            line.quantity = quantity;
            changed
        });
        found
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&self) {
        self.items.send_if_modified(|items| {
            let had_items = !items.is_empty();
            items.clear();
            had_items
        });
    }

    /// Sum of all quantities; 0 for an empty cart.
    pub fn total_items(&self) -> u64 {
        self.items
            .borrow()
            .iter()
            .map(|i| u64::from(i.quantity))
            .sum()
    }

    /// Sum of `price * quantity` using the price captured at add time.
    pub fn total_price(&self) -> f64 {
        self.items.borrow().iter().map(CartItem::line_total).sum()
    }
}

//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartItem, inputs, CartSummary)
//! - The session cart store and its quantity policies
//! - Business logic helpers (order summary, formatting)
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{CartItem, CartSummary};
pub use store::CartStore;

//! Product Listing Module
//!
//! The product grid and detail pages as data:
//! - The session listing view model (load, filters, debounced search)
//! - Product detail with related products
//! - REST API handlers for catalog reads and the session listing

pub mod detail;
pub mod handlers;
pub mod state;

pub use detail::{load_product_detail, ProductDetail};
pub use handlers::routes;
pub use state::{ListingStatus, ListingView, ProductListing};

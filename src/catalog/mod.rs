//! Product Catalog Module
//!
//! Read-only access to the remote catalog API:
//! - Domain models (Product, Rating)
//! - The `Catalog` trait and its HTTP implementation
//! - A single fetch-failure error type

pub mod client;
pub mod error;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{Catalog, CatalogClient};
pub use error::CatalogError;
pub use models::{Product, Rating};

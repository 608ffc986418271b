//! Catalog Domain Models
//!
//! Shapes returned by the remote catalog API. They are read-only once
//! fetched and are copied into view state as needed.

use serde::{Deserialize, Serialize};

/// Customer rating attached to a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Average score between 0 and 5
    pub rate: f64,

    /// Number of ratings that make up the average
    pub count: u64,
}

/// A product as served by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,

    /// Unit price, currency agnostic
    pub price: f64,

    #[serde(default)]
    pub description: String,
    pub category: String,

    /// Image URI
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub rating: Rating,
}

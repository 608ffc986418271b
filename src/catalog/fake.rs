//! In-memory catalog for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::StatusCode;

use super::{Catalog, CatalogError, Product, Rating};

pub fn product(id: u64, title: &str, price: f64, category: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://example.com/{id}.png"),
        rating: Rating {
            rate: 3.9,
            count: 120,
        },
    }
}

/// Canned catalog responses. `fail` turns every call into a 503 and
/// `latency` delays every response.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub fail: bool,
    pub latency: Duration,
    pub calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for p in &products {
            if !categories.contains(&p.category) {
                categories.push(p.category.clone());
            }
        }
        Self {
            products,
            categories,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    async fn respond<T>(&self, resource: &'static str, value: T) -> Result<T, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail {
            return Err(CatalogError::Status {
                resource,
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(value)
    }
}

impl Catalog for FakeCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.respond("products", self.products.clone()).await
    }

    async fn get_product(&self, id: u64) -> Result<Product, CatalogError> {
        let found = self
            .respond("product", self.products.iter().find(|p| p.id == id).cloned())
            .await?;
        found.ok_or(CatalogError::Status {
            resource: "product",
            status: StatusCode::NOT_FOUND,
        })
    }

    async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.respond("categories", self.categories.clone()).await
    }

    async fn list_products_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.respond(
            "products by category",
            self.products
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect(),
        )
        .await
    }
}

//! HTTP client for the remote product catalog.

use std::fmt::Debug;
use std::future::Future;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::CatalogError;
use super::models::Product;

/// The read-only catalog interface consumed by the listing and cart flows.
///
/// [`CatalogClient`] talks to the HTTP API; tests substitute in-memory
/// catalogs.
pub trait Catalog: Send + Sync {
    /// `GET /products`
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// `GET /products/{id}`
    fn get_product(&self, id: u64) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// `GET /products/categories`
    fn list_categories(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    /// `GET /products/category/{category}`
    fn list_products_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// A client for the catalog service.
///
/// No retries and no caching: every call is a single request and any
/// failure is handed straight back to the caller.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a client rooted at `catalog_url`.
    pub fn new(catalog_url: &str) -> Result<Self, CatalogError> {
        let base_url =
            Url::parse(catalog_url).map_err(|_| CatalogError::InvalidUrl(catalog_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(catalog_url.to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Joins percent-encoded path segments onto the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        url: Url,
    ) -> Result<T, CatalogError> {
        debug!(%url, resource, "fetching from catalog");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| CatalogError::Request { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { resource, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| CatalogError::Request { resource, source })
    }
}

impl Catalog for CatalogClient {
    #[instrument(skip(self), err(level = "debug"))]
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = self.get_json("products", self.endpoint(&["products"])).await?;
        debug!(n_products = products.len(), "fetched products");
        Ok(products)
    }

    #[instrument(skip(self), err(level = "debug"))]
    async fn get_product(&self, id: u64) -> Result<Product, CatalogError> {
        let id = id.to_string();
        self.get_json("product", self.endpoint(&["products", &id]))
            .await
    }

    #[instrument(skip(self), err(level = "debug"))]
    async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.get_json("categories", self.endpoint(&["products", "categories"]))
            .await
    }

    #[instrument(skip(self), err(level = "debug"))]
    async fn list_products_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.get_json(
            "products by category",
            self.endpoint(&["products", "category", category]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    fn product_json(id: u64, title: &str, price: f64, category: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "price": price,
            "description": format!("{title} description"),
            "category": category,
            "image": format!("https://example.com/{id}.png"),
            "rating": { "rate": 4.1, "count": 120 }
        })
    }

    #[test]
    fn endpoint_encodes_path_segments() {
        let client = CatalogClient::new("https://fakestoreapi.com").unwrap();
        assert_eq!(
            client
                .endpoint(&["products", "category", "men's clothing"])
                .as_str(),
            "https://fakestoreapi.com/products/category/men's%20clothing"
        );
        assert_eq!(
            client.endpoint(&["products", "7"]).as_str(),
            "https://fakestoreapi.com/products/7"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            CatalogClient::new("not a url"),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            CatalogClient::new("mailto:shop@example.com"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn list_products_decodes_catalog_response() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products");
            then.status(200).json_body(json!([
                product_json(1, "Backpack", 109.95, "men's clothing"),
                product_json(2, "Slim Fit T-Shirt", 22.3, "men's clothing"),
            ]));
        });

        let client = CatalogClient::new(&server.base_url()).unwrap();
        let products = client.list_products().await.unwrap();

        mock.assert();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Backpack");
        assert_eq!(products[1].price, 22.3);
        assert_eq!(products[1].rating.count, 120);
    }

    #[tokio::test]
    async fn categories_and_category_listing() {
        let server = MockServer::start_async().await;
        let categories = server.mock(|when, then| {
            when.method(GET).path("/products/categories");
            then.status(200)
                .json_body(json!(["electronics", "jewelery"]));
        });
        let by_category = server.mock(|when, then| {
            when.method(GET).path("/products/category/electronics");
            then.status(200)
                .json_body(json!([product_json(9, "Hard Drive", 64.0, "electronics")]));
        });

        let client = CatalogClient::new(&server.base_url()).unwrap();
        assert_eq!(
            client.list_categories().await.unwrap(),
            vec!["electronics".to_string(), "jewelery".to_string()]
        );
        let products = client.list_products_by_category("electronics").await.unwrap();
        assert_eq!(products[0].id, 9);

        categories.assert();
        by_category.assert();
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/404");
            then.status(404);
        });

        let client = CatalogClient::new(&server.base_url()).unwrap();
        let err = client.get_product(404).await.unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Status {
                resource: "product",
                status: StatusCode::NOT_FOUND
            }
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_fetch_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/1");
            then.status(200).body("<html>maintenance</html>");
        });

        let client = CatalogClient::new(&server.base_url()).unwrap();
        let err = client.get_product(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Request { resource: "product", .. }));
    }
}

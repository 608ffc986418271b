//! Product detail page data.

use serde::Serialize;

use crate::catalog::{Catalog, CatalogError, Product};

/// How many products from the same category accompany a detail view.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    pub related_products: Vec<Product>,
}

/// Fetches a product plus a few others from its category.
pub async fn load_product_detail(
    catalog: &impl Catalog,
    id: u64,
) -> Result<ProductDetail, CatalogError> {
    let product = catalog.get_product(id).await?;
    let related_products = catalog
        .list_products_by_category(&product.category)
        .await?
        .into_iter()
        .filter(|p| p.id != product.id)
        .take(RELATED_PRODUCTS_LIMIT)
        .collect();

    Ok(ProductDetail {
        product,
        related_products,
    })
}

//! REST API handlers for catalog reads and the session product listing

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use super::detail::{load_product_detail, ProductDetail};
use super::state::ListingView;
use crate::catalog::{Catalog, Product};
use crate::filter::{apply_filters, price_bound, FilterSpec, SortMode};
use crate::router::ApiError;
use crate::session::SharedSession;
use crate::state::SharedState;

/// Query string accepted by `GET /products`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Comma separated category names
    pub categories: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub q: Option<String>,
    pub sort: Option<SortMode>,
}

impl From<ProductQuery> for FilterSpec {
    fn from(query: ProductQuery) -> Self {
        FilterSpec {
            categories: query
                .categories
                .iter()
                .flat_map(|c| c.split(','))
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            min_price: query.min_price.map_or(0.0, price_bound),
            max_price: query.max_price.map_or(0.0, price_bound),
            search_query: query.q.unwrap_or_default(),
            sort_by: query.sort.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /listing/search`
#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub query: String,
}

/// Creates routes for catalog and listing operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(product_detail))
        .route("/categories", get(list_categories))
        .route("/categories/:category/products", get(category_products))
        .route("/listing", get(listing_view))
        .route("/listing/load", post(load_listing))
        .route("/listing/filters", put(set_filters).delete(clear_filters))
        .route("/listing/search", put(set_search))
}

/// Endpoint: GET /products
/// Fetches the catalog and filters it according to the query string.
async fn list_products(
    State(state): State<SharedState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(apply_filters(&products, &query.into())))
}

/// Endpoint: GET /products/{id}
async fn product_detail(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<ProductDetail>, ApiError> {
    Ok(Json(load_product_detail(&state.catalog, id).await?))
}

/// Endpoint: GET /categories
async fn list_categories(State(state): State<SharedState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// Endpoint: GET /categories/{category}/products
async fn category_products(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.catalog.list_products_by_category(&category).await?))
}

/// Endpoint: GET /listing
async fn listing_view(Extension(session): Extension<SharedSession>) -> Json<ListingView> {
    Json(session.listing.view())
}

/// Endpoint: POST /listing/load
async fn load_listing(
    State(state): State<SharedState>,
    Extension(session): Extension<SharedSession>,
) -> Result<Json<ListingView>, ApiError> {
    session
        .listing
        .load(&state.catalog, &session.toasts)
        .await?;
    Ok(Json(session.listing.view()))
}

/// Endpoint: PUT /listing/filters
async fn set_filters(
    Extension(session): Extension<SharedSession>,
    Json(filters): Json<FilterSpec>,
) -> Json<ListingView> {
    session.listing.set_filters(filters);
    Json(session.listing.view())
}

/// Endpoint: DELETE /listing/filters
async fn clear_filters(Extension(session): Extension<SharedSession>) -> Json<ListingView> {
    session.listing.clear_filters();
    Json(session.listing.view())
}

/// Endpoint: PUT /listing/search
/// The query is applied once the debounce period passes without new input.
async fn set_search(
    Extension(session): Extension<SharedSession>,
    Json(input): Json<SearchInput>,
) -> (StatusCode, Json<ListingView>) {
    session.listing.set_search_input(input.query);
    (StatusCode::ACCEPTED, Json(session.listing.view()))
}

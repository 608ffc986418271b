//! REST API handlers for shopping cart operations
//!
//! Every handler answers with the updated `CartSummary` and reports the
//! outcome through the session's toast queue.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use tracing::info;

use super::{helpers::*, models::*};
use crate::catalog::Catalog;
use crate::router::ApiError;
use crate::session::SharedSession;
use crate::state::SharedState;
use crate::toast::ToastSpec;

/// Lifetime of the removal and clear confirmations
const CART_TOAST_MILLIS: u64 = 3000;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(update_quantity).delete(remove_item))
}

/// Endpoint: GET /cart
async fn get_cart(
    State(state): State<SharedState>,
    Extension(session): Extension<SharedSession>,
) -> Json<CartSummary> {
    Json(summarize(&session.cart, state.config.tax_rate))
}

/// Endpoint: POST /cart/items
/// Looks the product up in the catalog and adds it to the cart.
async fn add_item(
    State(state): State<SharedState>,
    Extension(session): Extension<SharedSession>,
    Json(payload): Json<AddItemInput>,
) -> Result<Json<CartSummary>, ApiError> {
    let product = match state.catalog.get_product(payload.product_id).await {
        Ok(product) => product,
        Err(err) => {
            session
                .toasts
                .add_toast(ToastSpec::error("Failed to add item to cart"));
            return Err(err.into());
        }
    };

    if !state.config.add_item_delay.is_zero() {
        tokio::time::sleep(state.config.add_item_delay).await;
    }

    let added = payload.quantity.max(1);
    session.cart.add_item(&product, payload.quantity);
    session.toasts.add_toast(ToastSpec::success(format!(
        "Added {} {} to cart",
        added, product.title
    )));

    info!(
        session = %session.id,
        cart = %format_item_summary(&session.cart.items()),
        "item added to cart"
    );
    Ok(Json(summarize(&session.cart, state.config.tax_rate)))
}

/// Endpoint: PUT /cart/items/{id}
/// Quantities below 1 are ignored.
async fn update_quantity(
    State(state): State<SharedState>,
    Extension(session): Extension<SharedSession>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateQuantityInput>,
) -> Json<CartSummary> {
    session.cart.update_quantity(id, payload.quantity);
    Json(summarize(&session.cart, state.config.tax_rate))
}

/// Endpoint: DELETE /cart/items/{id}
async fn remove_item(
    State(state): State<SharedState>,
    Extension(session): Extension<SharedSession>,
    Path(id): Path<u64>,
) -> Json<CartSummary> {
    if let Some(line) = session.cart.remove_item(id) {
        session.toasts.add_toast(
            ToastSpec::info(format!("Removed {} from cart", line.title))
                .with_description("Item removed successfully")
                .with_duration(CART_TOAST_MILLIS),
        );
    }
    Json(summarize(&session.cart, state.config.tax_rate))
}

/// Endpoint: DELETE /cart
async fn clear_cart(
    State(state): State<SharedState>,
    Extension(session): Extension<SharedSession>,
) -> Json<CartSummary> {
    session.cart.clear_cart();
    session.toasts.add_toast(
        ToastSpec::info("Cart cleared")
            .with_description("Your cart has been emptied")
            .with_duration(CART_TOAST_MILLIS),
    );
    info!(session = %session.id, "cart cleared");
    Json(summarize(&session.cart, state.config.tax_rate))
}

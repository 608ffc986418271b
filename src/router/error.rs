//! Error responses for the JSON API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::catalog::CatalogError;

/// Failures a handler hands back to the client.
///
/// Cart and filter operations never fail; only catalog reads do.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Catalog(_) => StatusCode::BAD_GATEWAY,
        };
        warn!(%status, error = %self, "request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

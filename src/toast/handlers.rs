//! REST API handlers for the session toast queue

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Extension, Json, Router};
use serde_json::{json, Value};

use super::models::{Toast, ToastSpec};
use crate::session::SharedSession;
use crate::state::SharedState;

/// Creates routes for toast operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/toasts", get(list_toasts).post(add_toast))
        .route("/toasts/:id", delete(remove_toast))
}

/// Endpoint: GET /toasts
async fn list_toasts(Extension(session): Extension<SharedSession>) -> Json<Vec<Toast>> {
    Json(session.toasts.toasts())
}

/// Endpoint: POST /toasts
/// Returns the id so the caller can dismiss it early.
async fn add_toast(
    Extension(session): Extension<SharedSession>,
    Json(spec): Json<ToastSpec>,
) -> (StatusCode, Json<Value>) {
    let id = session.toasts.add_toast(spec);
    (StatusCode::CREATED, Json(json!({ "id": id })))
}

/// Endpoint: DELETE /toasts/{id}
/// Unknown ids are accepted silently.
async fn remove_toast(
    Extension(session): Extension<SharedSession>,
    Path(id): Path<String>,
) -> StatusCode {
    session.toasts.remove_toast(&id);
    StatusCode::NO_CONTENT
}

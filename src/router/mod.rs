//! Routing module for the storefront application

pub mod error;

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::session::{session_cookie, SESSION_COOKIE};
use crate::state::SharedState;

pub use error::ApiError;

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = middleware::from_fn(|req: Request, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        info!(%method, %uri, "request");
        let res = next.run(req).await;
        if !res.status().is_success() {
            warn!(%method, %uri, status = %res.status(), "request did not succeed");
        }
        res
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .route("/session", post(open_session))
        .merge(crate::listing::routes())
        .merge(crate::cart::routes())
        .merge(crate::toast::routes())
        .layer(middleware::from_fn_with_state(state.clone(), session_layer))
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Attaches the caller's session to the request, issuing a cookie for new ones.
///
/// Sessions are only created by requests that change state. Reads from a
/// client without a live session are answered from an empty transient
/// session that is never stored.
async fn session_layer(State(state): State<SharedState>, mut req: Request, next: Next) -> Response {
    let existing = session_cookie(req.headers()).and_then(|id| state.find_session(id));
    let read_only = matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS);

    let (session, is_new) = match existing {
        Some(session) => (session, false),
        None if read_only => (state.transient_session(), false),
        None => (state.create_session(), true),
    };
    let new_id = is_new.then(|| session.id.clone());
    req.extensions_mut().insert(session);

    let mut response = next.run(req).await;

    if let Some(session_id) = new_id {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => warn!(%err, "could not encode session cookie"),
        }
    }

    response
}

/// Endpoint: POST /session
/// Opens a session; the cookie is issued by the session layer.
async fn open_session() -> StatusCode {
    StatusCode::NO_CONTENT
}

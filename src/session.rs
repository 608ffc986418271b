//! Per-session context handed to every handler.
//!
//! One browser session owns exactly one cart, one toast queue and one
//! product listing. Handlers receive the session explicitly instead of
//! reaching for global state.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use tokio::time::Instant;
use uuid::Uuid;

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::listing::ProductListing;
use crate::toast::ToastNotifier;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "storefront_session";

/// Shared handle to a session
pub type SharedSession = Arc<Session>;

#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub cart: CartStore,
    pub toasts: ToastNotifier,
    pub listing: ProductListing,
    last_seen: Mutex<Instant>,
}

impl Session {
    pub fn new(id: impl Into<String>, config: &StorefrontConfig) -> Self {
        Self {
            id: id.into(),
            cart: CartStore::new(),
            toasts: ToastNotifier::new(config.toast_duration),
            listing: ProductListing::new(config.search_debounce),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    /// Marks the session as used now.
    pub fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// Time since the session was last used.
    pub fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }
}

/// Mints a fresh session id (a simple-format UUID).
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// True for ids in the shape [`new_session_id`] produces.
pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == 32 && Uuid::try_parse(id).is_ok()
}

/// Reads a well-formed session id from the request cookies.
///
/// Empty, oversized or otherwise malformed values are ignored, as if no
/// cookie had been sent.
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && is_valid_session_id(value))
        .map(|(_, value)| value)
}

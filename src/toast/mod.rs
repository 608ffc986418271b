//! Toast Notification Module
//!
//! Transient user-facing feedback:
//! - Toast models (Toast, ToastSpec, ToastVariant)
//! - The per-session notifier with auto-dismiss timers
//! - REST API handlers for reading and dismissing toasts

pub mod handlers;
pub mod models;
pub mod notifier;

pub use handlers::routes;
pub use models::{Toast, ToastSpec, ToastVariant};
pub use notifier::ToastNotifier;

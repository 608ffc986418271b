//! Storefront Library
//!
//! Client-side storefront logic behind a small JSON API: a read-only
//! catalog client, a session cart with derived totals, the product filter
//! pipeline and a toast queue with timed auto-dismissal.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod filter;
pub mod listing;
pub mod toast;

// Infrastructure
pub mod config;
pub mod router;
pub mod schedule;
pub mod session;
pub mod state;

//! Runtime configuration for the storefront server.
//!
//! Every setting has a default; environment variables prefixed with
//! `STOREFRONT_` override them.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Base URL of the public catalog API used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(4000);
pub const DEFAULT_TAX_RATE: f64 = 0.08;
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
    #[error("{name} must be a non-negative number, got {value}")]
    NegativeRate { name: &'static str, value: f64 },
}

/// Configuration shared by the catalog client, the session stores and the router.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Base URL of the remote catalog API.
    pub catalog_url: String,
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Artificial latency applied before an add-to-cart request commits.
    pub add_item_delay: Duration,
    /// Quiet period before a search input is applied to the listing.
    pub search_debounce: Duration,
    /// Lifetime of toasts created without an explicit duration.
    pub toast_duration: Duration,
    /// Tax rate applied to the cart subtotal.
    pub tax_rate: f64,
    /// Sessions unused for this long are dropped with their cart and toasts.
    pub session_idle_timeout: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            add_item_delay: Duration::ZERO,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            toast_duration: DEFAULT_TOAST_DURATION,
            tax_rate: DEFAULT_TAX_RATE,
            session_idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
        }
    }
}

impl StorefrontConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("STOREFRONT_CATALOG_URL") {
            config.catalog_url = url.trim_end_matches('/').to_string();
        }
        if let Some(addr) = parse_var::<SocketAddr>(&lookup, "STOREFRONT_BIND_ADDR")? {
            config.bind_addr = addr;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "STOREFRONT_ADD_ITEM_DELAY_MS")? {
            config.add_item_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "STOREFRONT_SEARCH_DEBOUNCE_MS")? {
            config.search_debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "STOREFRONT_TOAST_DURATION_MS")? {
            config.toast_duration = Duration::from_millis(ms);
        }
        if let Some(rate) = parse_var::<f64>(&lookup, "STOREFRONT_TAX_RATE")? {
            if rate.is_nan() || rate < 0.0 {
                return Err(ConfigError::NegativeRate {
                    name: "STOREFRONT_TAX_RATE",
                    value: rate,
                });
            }
            config.tax_rate = rate;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "STOREFRONT_SESSION_IDLE_SECS")? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "STOREFRONT_SESSION_IDLE_SECS",
                    value: secs.to_string(),
                });
            }
            config.session_idle_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { name, value: raw })
}

//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// A failed catalog read.
///
/// All variants describe the same condition from the caller's point of
/// view: the fetch failed and no partial data is available.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch {resource}: catalog responded with {status}")]
    Status {
        resource: &'static str,
        status: StatusCode,
    },
    #[error("failed to fetch {resource}")]
    Request {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid catalog url {0:?}")]
    InvalidUrl(String),
}

impl CatalogError {
    /// The kind of resource that could not be fetched.
    pub fn resource(&self) -> &'static str {
        match self {
            CatalogError::Status { resource, .. } | CatalogError::Request { resource, .. } => {
                resource
            }
            CatalogError::InvalidUrl(_) => "catalog url",
        }
    }
}

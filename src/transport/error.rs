//! Transport error types.

use thiserror::Error;

/// Errors talking to the media host.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// The host answered an upload with a non-2xx status
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Host-supplied message, or a generic one
        message: String,
    },

    /// The response body was not the expected JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The listing endpoint answered with a non-2xx status
    #[error("Listing request failed ({status})")]
    ListingStatus {
        /// HTTP status code
        status: u16,
    },

    /// The listing JSON had no `resources` array
    #[error("Listing response has no resources")]
    MissingResources,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> Self {
        TransportError::Network(e.to_string())
    }
}

//! Store error types

use thiserror::Error;

/// Error type for notification pulls and mutations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The server answered with a non-success status
    #[error("Notification API returned status {status}")]
    Api {
        /// HTTP status code
        status: u16,
    },

    /// The request itself failed (connect, timeout, body)
    #[error("Notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The base URL and path do not combine into a valid endpoint
    #[error("Invalid notification endpoint: {0}")]
    InvalidUrl(String),

    /// The response body did not decode
    #[error("Notification decode error: {0}")]
    Decode(String),
}

impl StoreError {
    /// Create an API status error
    pub fn api(status: u16) -> Self {
        Self::Api { status }
    }

    /// Create an invalid URL error
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

//! Push channel error types

use thiserror::Error;

/// Error type for push channel operations
#[derive(Error, Debug)]
pub enum PushError {
    /// The portal origin cannot be turned into a push endpoint
    #[error("Invalid push endpoint: {0}")]
    InvalidEndpoint(String),

    /// Dialing the push endpoint failed
    #[error("Push connect failed: {0}")]
    ConnectFailed(String),

    /// Failed to send a frame
    #[error("Failed to send frame: {0}")]
    SendFailed(String),

    /// Failed to receive a frame
    #[error("Failed to receive frame: {0}")]
    ReceiveFailed(String),

    /// Connection closed unexpectedly
    #[error("Connection closed unexpectedly")]
    ConnectionClosed,

    /// Wire format error
    #[error(transparent)]
    Wire(#[from] quotify_wire::WireError),
}

impl PushError {
    /// Create an invalid endpoint error
    pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
        Self::InvalidEndpoint(msg.into())
    }

    /// Create a connect failed error
    pub fn connect_failed(msg: impl Into<String>) -> Self {
        Self::ConnectFailed(msg.into())
    }

    /// Create a send failed error
    pub fn send_failed(msg: impl Into<String>) -> Self {
        Self::SendFailed(msg.into())
    }

    /// Create a receive failed error
    pub fn receive_failed(msg: impl Into<String>) -> Self {
        Self::ReceiveFailed(msg.into())
    }
}

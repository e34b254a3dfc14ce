//! Wire format error types

use thiserror::Error;

/// Error type for encoding and decoding push-channel frames
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Message serialization error
    #[error("Message encode error: {0}")]
    Encode(String),

    /// Message deserialization error
    #[error("Message decode error: {0}")]
    Decode(String),
}

impl WireError {
    /// Create an encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

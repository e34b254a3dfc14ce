//! Push-channel wire messages
//!
//! JSON text frames, internally tagged by a `"type"` field.

use crate::{Notification, WireError};
use serde::{Deserialize, Serialize};

/// Message sent from client to server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Authentication frame, sent once immediately after the socket opens.
    ///
    /// The id is asserted by the already-authenticated page session; the
    /// push layer does not re-verify it. The session/cookie layer is the
    /// trust boundary.
    #[serde(rename_all = "camelCase")]
    Auth {
        /// Id of the user this channel belongs to
        user_id: String,
    },
}

impl ClientMessage {
    /// Encode this message as a JSON text frame
    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(|e| WireError::encode(e.to_string()))
    }
}

/// Message pushed from server to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Acknowledges the auth frame; the session is authenticated from here on
    #[serde(rename_all = "camelCase")]
    AuthSuccess {
        /// Server-assigned connection id, informational only
        #[serde(default)]
        client_id: Option<String>,
    },
    /// A notification was created for this user
    #[serde(rename_all = "camelCase")]
    NewNotification {
        /// The freshly created notification
        notification: Notification,
    },
}

impl ServerMessage {
    /// Decode a JSON text frame
    ///
    /// Malformed frames and unknown `"type"` tags come back as
    /// [`WireError::Decode`]; callers log and drop them without touching
    /// the connection.
    pub fn from_json(text: &str) -> Result<Self, WireError> {
        serde_json::from_str(text).map_err(|e| WireError::decode(e.to_string()))
    }
}

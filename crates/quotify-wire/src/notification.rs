//! Notification model
//!
//! Server-owned rows as seen by the client. The read flag transitions
//! false -> true exactly once per mark action and never reverts; the
//! client treats the server as the source of truth and never flips the
//! flag locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a notification
///
/// The server may introduce new categories at any time; anything the
/// client does not recognize deserializes to [`NotificationKind::Generic`]
/// so an old client never drops a frame over an unknown kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// A supplier submitted a quote for a request
    QuoteSubmitted,
    /// A document was uploaded against a quote
    DocumentUploaded,
    /// All required documents for a quote are present
    DocumentationComplete,
    /// Anything else
    #[serde(other)]
    Generic,
}

/// A notification as delivered by the server
///
/// `related_quote_id` and `related_request_id` are back-references into the
/// quoting domain; either or both may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Opaque unique id
    pub id: String,
    /// Id of the user this notification belongs to
    pub user_id: String,
    /// Notification category
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Short display title
    pub title: String,
    /// Display message body
    pub message: String,
    /// Back-reference to the related quote, if any
    #[serde(default)]
    pub related_quote_id: Option<String>,
    /// Back-reference to the related quote request, if any
    #[serde(default)]
    pub related_request_id: Option<String>,
    /// Whether the owner has marked this notification read
    pub is_read: bool,
    /// Creation timestamp, immutable, set by the server
    pub created_at: DateTime<Utc>,
}

//! Notification API contract
//!
//! The HTTP surface is an external collaborator; the store only depends on
//! this trait. Mark-read calls are idempotent on the server: marking an
//! already-read notification is a no-op, not an error.

use crate::StoreError;
use async_trait::async_trait;
use quotify_wire::Notification;
use serde::{Deserialize, Serialize};

/// One pull's worth of server truth
///
/// Notifications arrive newest-first as ordered by the server; the client
/// never re-sorts them. `unread_count` is the server's own count of unread
/// rows, not something recomputed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    /// Notification list, newest first
    pub notifications: Vec<Notification>,
    /// Server-reported unread count
    pub unread_count: u64,
}

/// Server-side notification operations the store depends on
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    /// Pull the notification list and unread count for a user
    async fn fetch(&self, user_id: &str) -> Result<NotificationPage, StoreError>;

    /// Mark one notification read; idempotent
    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<(), StoreError>;

    /// Mark every notification of the user read
    async fn mark_all_read(&self, user_id: &str) -> Result<(), StoreError>;
}

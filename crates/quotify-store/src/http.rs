//! HTTP implementation of the notification API
//!
//! Identity travels as a client-asserted header, the same trust boundary
//! as the push channel's auth frame: the portal session layer in front of
//! these endpoints is what actually authenticates the user.

use crate::{NotificationPage, NotificationsApi, StoreError};
use async_trait::async_trait;
use url::Url;

const USER_HEADER: &str = "X-User-Id";

/// reqwest-backed [`NotificationsApi`]
#[derive(Debug, Clone)]
pub struct HttpNotificationsApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpNotificationsApi {
    /// Create an API client for a portal origin
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::invalid_url(e.to_string()))
    }
}

#[async_trait]
impl NotificationsApi for HttpNotificationsApi {
    async fn fetch(&self, user_id: &str) -> Result<NotificationPage, StoreError> {
        let url = self.endpoint("/api/notifications")?;
        let response = self
            .client
            .get(url)
            .header(USER_HEADER, user_id)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::api(response.status().as_u16()));
        }
        let page = response.json::<NotificationPage>().await?;
        Ok(page)
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("/api/notifications/{}/read", notification_id))?;
        let response = self
            .client
            .patch(url)
            .header(USER_HEADER, user_id)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::api(response.status().as_u16()));
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<(), StoreError> {
        let url = self.endpoint("/api/notifications/read-all")?;
        let response = self
            .client
            .patch(url)
            .header(USER_HEADER, user_id)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::api(response.status().as_u16()));
        }
        Ok(())
    }
}

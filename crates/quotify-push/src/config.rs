//! Push channel configuration

use crate::ReconnectPolicy;

/// Configuration for the push channel client
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Whether the push channel is enabled at all
    ///
    /// With the channel disabled, [`crate::PushClient::connect`] is a no-op
    /// and the feed relies on interval polling alone.
    pub enabled: bool,
    /// Path of the push endpoint on the portal origin
    pub endpoint_path: String,
    /// Reconnect backoff policy
    pub reconnect: ReconnectPolicy,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint_path: "/ws".to_string(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl PushConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the push channel
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the endpoint path
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    /// Set the reconnect policy
    pub fn reconnect(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }
}

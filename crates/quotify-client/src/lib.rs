//! # Quotify Client
//!
//! Real-time notification client for the Quotify supplier portal.
//!
//! This facade re-exports the workspace crates:
//!
//! - [`wire`] - notification model and push-channel wire messages
//! - [`push`] - push channel client with capped-backoff reconnection
//! - [`store`] - notification state store (interval pull + invalidation)
//! - [`feed`] - feed presenter and sound cue player
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quotify_client::prelude::*;
//! use std::sync::Arc;
//! use url::Url;
//!
//! let origin = Url::parse("https://portal.quotify.example")?;
//! let api = Arc::new(HttpNotificationsApi::new(origin.clone()));
//! let store = NotificationStore::new(api, "supplier-17", StoreConfig::default());
//! let push = PushClient::new(origin, Some("supplier-17".into()), PushConfig::default());
//!
//! let mut feed = FeedPresenter::with_sound(store, push);
//! feed.mount();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use quotify_feed as feed;
pub use quotify_push as push;
pub use quotify_store as store;
pub use quotify_wire as wire;

/// Prelude module - import everything you need with `use quotify_client::prelude::*`
pub mod prelude {
    pub use quotify_feed::{Cue, FeedPresenter, SoundCue};
    pub use quotify_push::{
        ChannelStatus, ConnectionState, PushClient, PushConfig, PushError, PushEvent,
        ReconnectPolicy,
    };
    pub use quotify_store::{
        FeedSnapshot, HttpNotificationsApi, NotificationPage, NotificationStore, NotificationsApi,
        StoreConfig, StoreError,
    };
    pub use quotify_wire::{
        ClientMessage, Notification, NotificationKind, ServerMessage, WireError,
    };
}

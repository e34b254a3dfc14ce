//! # quotify-store
//!
//! Client-side notification state store for the Quotify supplier portal.
//!
//! The store is the single cache of the notification list and unread
//! count, refreshed two ways: a fixed-interval pull (the consistency
//! backstop) and forced re-pulls whenever the push channel or a mark-read
//! action invalidates it. Pushed payloads are never merged into the cache
//! directly; a push only forces a re-pull, so the cache always reflects
//! some server snapshot.
//!
//! Invalidations coalesce: at most one fetch is outstanding at a time, and
//! invalidations arriving mid-fetch schedule exactly one follow-up fetch.
//!
//! ```rust,ignore
//! use quotify_store::{HttpNotificationsApi, NotificationStore, StoreConfig};
//! use std::sync::Arc;
//! use url::Url;
//!
//! let api = Arc::new(HttpNotificationsApi::new(Url::parse("https://portal.quotify.example")?));
//! let store = NotificationStore::new(api, "supplier-17", StoreConfig::default());
//! store.start_polling();
//!
//! let mut snapshots = store.subscribe();
//! snapshots.changed().await?;
//! println!("{} unread", snapshots.borrow().unread_count);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod api;
mod error;
mod http;
mod store;

pub use api::{NotificationPage, NotificationsApi};
pub use error::StoreError;
pub use http::HttpNotificationsApi;
pub use store::{FeedSnapshot, NotificationStore, StoreConfig};

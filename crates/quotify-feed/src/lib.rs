//! # quotify-feed
//!
//! Notification feed presenter for the Quotify supplier portal.
//!
//! [`FeedPresenter`] wires the pieces together: it mounts the push channel
//! and the polling store, and bridges push events into feed behavior.
//! Every pushed notification triggers exactly one sound cue and exactly
//! one cache invalidation. The pushed payload itself is never merged into
//! the cache; the follow-up pull is what updates the rendered state, so
//! the feed always shows some server snapshot.
//!
//! ```rust,ignore
//! use quotify_feed::FeedPresenter;
//! use quotify_push::{PushClient, PushConfig};
//! use quotify_store::{HttpNotificationsApi, NotificationStore, StoreConfig};
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

mod presenter;
mod sound;

pub use presenter::FeedPresenter;
pub use sound::{Cue, SoundCue};

//! # quotify-push
//!
//! Push channel client for the Quotify supplier portal.
//!
//! One [`PushClient`] instance owns one logical real-time connection for an
//! authenticated user: it dials the portal's push endpoint, sends the auth
//! frame, pumps incoming frames into a [`PushEvent`] stream, and recovers
//! from disconnects with capped exponential backoff (5 attempts, delays
//! `min(1000ms * 2^attempt, 30s)`). When the attempts are exhausted the
//! client degrades to poll-only mode, visible on the [`ChannelStatus`]
//! watch channel.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quotify_push::{PushClient, PushConfig, PushEvent};
//! use url::Url;
//!
//! let origin = Url::parse("https://portal.quotify.example")?;
//! let mut client = PushClient::new(origin, Some("supplier-17".into()), PushConfig::default());
//! let mut events = client.events().expect("events taken once");
//! client.connect();
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         PushEvent::NotificationReceived(n) => println!("new: {}", n.title),
//!         PushEvent::AuthSucceeded { .. } => {}
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod backoff;
mod client;
mod config;
mod endpoint;
mod error;
mod state;
mod transport;

pub use backoff::ReconnectPolicy;
pub use client::{PushClient, PushEvent};
pub use config::PushConfig;
pub use endpoint::push_endpoint;
pub use error::PushError;
pub use state::{ChannelStatus, ConnectionState};
pub use transport::{PushSocket, PushTransport, Sleeper, TokioSleeper, WsTransport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ChannelStatus, ConnectionState, PushClient, PushConfig, PushError, PushEvent,
        ReconnectPolicy,
    };
}

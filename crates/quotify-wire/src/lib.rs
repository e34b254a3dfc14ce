//! # quotify-wire
//!
//! Notification model and push-channel wire messages for the Quotify
//! supplier portal.
//!
//! The push channel speaks JSON text frames. The client sends a single
//! [`ClientMessage::Auth`] frame after the socket opens; the server answers
//! with [`ServerMessage::AuthSuccess`] and thereafter pushes
//! [`ServerMessage::NewNotification`] frames as notifications are created.
//!
//! ```rust
//! use quotify_wire::{ClientMessage, ServerMessage};
//!
//! let auth = ClientMessage::Auth { user_id: "supplier-17".into() };
//! assert_eq!(auth.to_json().unwrap(), r#"{"type":"auth","userId":"supplier-17"}"#);
//!
//! let frame = r#"{"type":"auth_success","clientId":"c-1"}"#;
//! assert!(matches!(
//!     ServerMessage::from_json(frame).unwrap(),
//!     ServerMessage::AuthSuccess { .. }
//! ));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod message;
mod notification;

pub use error::WireError;
pub use message::{ClientMessage, ServerMessage};
pub use notification::{Notification, NotificationKind};

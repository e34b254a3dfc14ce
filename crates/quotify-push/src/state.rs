//! Connection state machine
//!
//! The session loop drives these transitions; keeping them here, free of
//! sockets and timers, makes the 5-attempt cap and the status mapping
//! testable in plain unit tests.

use crate::ReconnectPolicy;
use std::time::Duration;

/// State of one push session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No session activity yet, or the session was disconnected
    Idle,
    /// Dialing the endpoint
    Connecting,
    /// Socket open; `authenticated` flips once `auth_success` arrives
    Open {
        /// Whether the server acknowledged the auth frame
        authenticated: bool,
    },
    /// Waiting out the backoff delay before redialing
    Reconnecting {
        /// Reconnect attempt about to be made (0-based)
        attempt: u32,
    },
    /// Reconnect attempts exhausted; the session is over
    Closed,
}

/// Push channel health as exposed to the UI
///
/// `PollOnly` covers both "never started" and "gave up": in either case the
/// feed is being kept fresh by interval polling alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    /// Socket open, events flowing
    Connected,
    /// Between connection attempts
    Reconnecting,
    /// No live socket and none coming; polling is the only refresh source
    PollOnly,
}

impl ConnectionState {
    /// Status to surface for this state
    pub fn status(&self) -> ChannelStatus {
        match self {
            Self::Open { .. } => ChannelStatus::Connected,
            Self::Connecting | Self::Reconnecting { .. } => ChannelStatus::Reconnecting,
            Self::Idle | Self::Closed => ChannelStatus::PollOnly,
        }
    }

    /// Begin dialing
    pub fn on_connecting(&mut self) {
        *self = Self::Connecting;
    }

    /// Socket opened; authentication not yet acknowledged
    pub fn on_open(&mut self) {
        *self = Self::Open {
            authenticated: false,
        };
    }

    /// Server acknowledged the auth frame
    ///
    /// Returns `true` when this actually transitioned (i.e. the socket was
    /// open and not yet authenticated).
    pub fn on_auth_success(&mut self) -> bool {
        match self {
            Self::Open { authenticated } if !*authenticated => {
                *authenticated = true;
                true
            }
            _ => false,
        }
    }

    /// Socket closed; decide between scheduling a reconnect and giving up
    ///
    /// Returns the backoff delay for `attempt` when a reconnect should be
    /// scheduled, `None` when the policy is exhausted (the state moves to
    /// [`ConnectionState::Closed`]).
    pub fn on_close(&mut self, attempt: u32, policy: &ReconnectPolicy) -> Option<Duration> {
        match policy.next_delay(attempt) {
            Some(delay) => {
                *self = Self::Reconnecting { attempt };
                Some(delay)
            }
            None => {
                *self = Self::Closed;
                None
            }
        }
    }

    /// Manual disconnect; valid from any state and terminal for the session
    pub fn on_disconnect(&mut self) {
        *self = Self::Idle;
    }
}

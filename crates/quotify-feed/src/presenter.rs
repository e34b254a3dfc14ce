//! Feed presenter
//!
//! Bridges the push channel into the store and exposes the read/mark
//! surface the UI renders from.

use crate::{Cue, SoundCue};
use quotify_push::{ChannelStatus, PushClient, PushEvent};
use quotify_store::{FeedSnapshot, NotificationStore, StoreError};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Presenter for the notification feed
///
/// Owns the push client and a handle to the shared store. While mounted, a
/// bridge task turns every pushed notification into exactly one sound cue
/// and exactly one cache invalidation, regardless of the payload content.
pub struct FeedPresenter {
    store: NotificationStore,
    push: PushClient,
    cue: Arc<dyn Cue>,
    bridge: Option<JoinHandle<()>>,
}

impl FeedPresenter {
    /// Create a presenter with an explicit cue implementation
    pub fn new(store: NotificationStore, push: PushClient, cue: Arc<dyn Cue>) -> Self {
        Self {
            store,
            push,
            cue,
            bridge: None,
        }
    }

    /// Create a presenter with the default chime player
    pub fn with_sound(store: NotificationStore, push: PushClient) -> Self {
        Self::new(store, push, Arc::new(SoundCue::new()))
    }

    /// Mount the feed: connect the push channel, start interval polling
    /// and begin bridging push events
    ///
    /// The first poll tick fires immediately and doubles as the initial
    /// load. Mounting twice is a warned no-op.
    pub fn mount(&mut self) {
        let Some(mut events) = self.push.events() else {
            tracing::warn!("feed already mounted");
            return;
        };
        self.push.connect();
        self.store.start_polling();

        let store = self.store.clone();
        let cue = self.cue.clone();
        self.bridge = Some(tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    PushEvent::AuthSucceeded { client_id } => {
                        tracing::debug!(client_id = ?client_id, "push channel ready");
                    }
                    PushEvent::NotificationReceived(notification) => {
                        cue.play();
                        store.invalidate().await;
                        tracing::debug!(
                            id = %notification.id,
                            kind = ?notification.kind,
                            "notification pushed; cache invalidated"
                        );
                    }
                }
            }
            tracing::debug!("push event bridge stopped");
        }));
    }

    /// Current snapshot of the feed
    pub fn snapshot(&self) -> FeedSnapshot {
        self.store.snapshot()
    }

    /// Subscribe to snapshot changes (the re-render trigger)
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.store.subscribe()
    }

    /// Push channel health: connected, reconnecting, or poll-only
    pub fn channel_status(&self) -> watch::Receiver<ChannelStatus> {
        self.push.status()
    }

    /// Mark one notification read
    ///
    /// Mutation failures propagate to the caller; there is no automatic
    /// retry and no optimistic local flip.
    pub async fn mark_read(&self, notification_id: &str) -> Result<(), StoreError> {
        self.store.mark_read(notification_id).await
    }

    /// Mark all notifications read
    pub async fn mark_all_read(&self) -> Result<(), StoreError> {
        self.store.mark_all_read().await
    }

    /// Unmount the feed: disconnect the push channel (cancelling any
    /// pending reconnect timer), stop polling and end the bridge task
    ///
    /// In-flight mutations are left to complete; they write to a cache
    /// nobody observes anymore.
    pub async fn unmount(&mut self) {
        self.push.disconnect().await;
        self.store.shutdown();
        if let Some(bridge) = self.bridge.take() {
            if bridge.await.is_err() {
                tracing::debug!("push event bridge ended abnormally");
            }
        }
    }
}

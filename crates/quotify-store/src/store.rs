//! Notification state store
//!
//! Process-wide shared cache of the notification feed. All writes go
//! through the invalidate/fetch cycle; nothing else touches the snapshot.

use crate::{NotificationsApi, StoreError};
use quotify_wire::Notification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Interval of the backstop re-pull
    pub poll_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl StoreConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the polling interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Immutable view of the cached feed
///
/// `revision` increments once per applied fetch, so observers can tell "a
/// fetch completed after my invalidation" apart from "nothing happened"
/// without looking at the clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    /// Notification list, in server order (newest first)
    pub notifications: Vec<Notification>,
    /// Server-reported unread count as of this snapshot
    pub unread_count: u64,
    /// Number of fetches applied so far; 0 until the first pull lands
    pub revision: u64,
}

#[derive(Default)]
struct FetchFlags {
    in_flight: bool,
    queued: bool,
}

struct StoreInner {
    api: Arc<dyn NotificationsApi>,
    user_id: String,
    config: StoreConfig,
    flags: Mutex<FetchFlags>,
    snapshot_tx: watch::Sender<FeedSnapshot>,
    shutdown_tx: watch::Sender<bool>,
    polling: AtomicBool,
}

/// Handle to the shared notification cache
///
/// Cheap to clone; every clone sees the same snapshot and the same
/// coalescing gate.
#[derive(Clone)]
pub struct NotificationStore {
    inner: Arc<StoreInner>,
}

impl NotificationStore {
    /// Create a store for one user
    pub fn new(
        api: Arc<dyn NotificationsApi>,
        user_id: impl Into<String>,
        config: StoreConfig,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(FeedSnapshot::default());
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(StoreInner {
                api,
                user_id: user_id.into(),
                config,
                flags: Mutex::new(FetchFlags::default()),
                snapshot_tx,
                shutdown_tx,
                polling: AtomicBool::new(false),
            }),
        }
    }

    /// Current snapshot of the feed
    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Force a re-pull
    ///
    /// Returns as soon as a fetch issued after this call is guaranteed:
    /// either a new fetch cycle starts now, or the in-flight cycle is told
    /// to run exactly one follow-up. Concurrent invalidations coalesce.
    pub async fn invalidate(&self) {
        let mut flags = self.inner.flags.lock().await;
        if flags.in_flight {
            flags.queued = true;
            return;
        }
        flags.in_flight = true;
        drop(flags);
        tokio::spawn(run_fetch_cycle(self.inner.clone()));
    }

    /// Mark one notification read, then force a re-pull
    ///
    /// The local flag is never flipped optimistically; the follow-up pull
    /// is what updates the snapshot. A failed mutation propagates and
    /// skips the re-pull.
    pub async fn mark_read(&self, notification_id: &str) -> Result<(), StoreError> {
        self.inner
            .api
            .mark_read(&self.inner.user_id, notification_id)
            .await?;
        self.invalidate().await;
        Ok(())
    }

    /// Mark every notification read, then force a re-pull
    pub async fn mark_all_read(&self) -> Result<(), StoreError> {
        self.inner.api.mark_all_read(&self.inner.user_id).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Start the interval re-pull backstop
    ///
    /// The first tick fires immediately, which doubles as the initial
    /// load. Starting twice is a warned no-op.
    pub fn start_polling(&self) {
        if self.inner.polling.swap(true, Ordering::SeqCst) {
            tracing::warn!("notification polling already started");
            return;
        }
        let store = self.clone();
        let mut shutdown = self.inner.shutdown_tx.subscribe();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(store.inner.config.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = async { let _ = shutdown.wait_for(|stop| *stop).await; } => break,
                    _ = ticker.tick() => store.invalidate().await,
                }
            }
            tracing::debug!("notification polling stopped");
        });
    }

    /// Stop the polling loop
    ///
    /// In-flight fetches and mutations are allowed to complete; they write
    /// to a cache nobody may be observing anymore, which is fine.
    pub fn shutdown(&self) {
        self.inner.shutdown_tx.send_replace(true);
    }
}

async fn run_fetch_cycle(inner: Arc<StoreInner>) {
    loop {
        match inner.api.fetch(&inner.user_id).await {
            Ok(page) => {
                inner.snapshot_tx.send_modify(|snapshot| {
                    snapshot.revision += 1;
                    snapshot.notifications = page.notifications;
                    snapshot.unread_count = page.unread_count;
                });
            }
            Err(e) => {
                // The interval backstop will try again; pull failures are
                // not surfaced to the UI.
                tracing::warn!(error = %e, "notification fetch failed");
            }
        }

        let mut flags = inner.flags.lock().await;
        if flags.queued {
            flags.queued = false;
            continue;
        }
        flags.in_flight = false;
        break;
    }
}

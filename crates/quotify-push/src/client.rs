//! Push channel client
//!
//! One [`PushClient`] owns one logical connection: the session task holds
//! the socket and the backoff timer exclusively, publishes health on a
//! watch channel, and forwards server events over an mpsc channel. The
//! client never merges pushed payloads into any cache; the feed layer
//! decides what a `new_notification` frame means.

use crate::{
    push_endpoint, ChannelStatus, ConnectionState, PushConfig, PushTransport, ReconnectPolicy,
    Sleeper, TokioSleeper, WsTransport,
};
use quotify_wire::{ClientMessage, Notification, ServerMessage};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use url::Url;

const EVENT_BUFFER: usize = 32;

/// Event surfaced by the push channel
#[derive(Debug, Clone)]
pub enum PushEvent {
    /// The server acknowledged the auth frame
    AuthSucceeded {
        /// Server-assigned connection id, if any
        client_id: Option<String>,
    },
    /// A notification was pushed for this user
    NotificationReceived(Notification),
}

/// Client for the portal's real-time push channel
pub struct PushClient {
    origin: Url,
    user_id: Option<String>,
    config: PushConfig,
    transport: Arc<dyn PushTransport>,
    sleeper: Arc<dyn Sleeper>,
    events_tx: Option<mpsc::Sender<PushEvent>>,
    events_rx: Option<mpsc::Receiver<PushEvent>>,
    status_tx: watch::Sender<ChannelStatus>,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PushClient {
    /// Create a client for `origin` using the real WebSocket transport
    ///
    /// `user_id` comes from the page session; without one the channel
    /// never connects and the feed is poll-only.
    pub fn new(origin: Url, user_id: Option<String>, config: PushConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (status_tx, _) = watch::channel(ChannelStatus::PollOnly);
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            origin,
            user_id,
            config,
            transport: Arc::new(WsTransport),
            sleeper: Arc::new(TokioSleeper),
            events_tx: Some(events_tx),
            events_rx: Some(events_rx),
            status_tx,
            shutdown_tx,
            task: None,
        }
    }

    /// Replace the transport (testing, alternative stacks)
    pub fn with_transport(mut self, transport: Arc<dyn PushTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the clock used for backoff sleeps (testing)
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Take the event stream
    ///
    /// Returns `Some` exactly once; the stream ends when the session task
    /// ends (give-up or disconnect).
    pub fn events(&mut self) -> Option<mpsc::Receiver<PushEvent>> {
        self.events_rx.take()
    }

    /// Subscribe to the channel health tri-state
    pub fn status(&self) -> watch::Receiver<ChannelStatus> {
        self.status_tx.subscribe()
    }

    /// Start the push session
    ///
    /// No-op when the channel is disabled, no user id is available, a
    /// session is already running, or this instance was disconnected.
    /// Returns immediately; connection progress shows on [`Self::status`].
    pub fn connect(&mut self) {
        if !self.config.enabled {
            tracing::debug!("push channel disabled; not connecting");
            return;
        }
        let Some(user_id) = self.user_id.clone() else {
            tracing::debug!("no user id available; push channel not started");
            return;
        };
        if self.task.as_ref().is_some_and(|t| !t.is_finished()) {
            tracing::warn!("push session already running; ignoring connect()");
            return;
        }
        if *self.shutdown_tx.borrow() {
            tracing::warn!("push client was disconnected; ignoring connect()");
            return;
        }
        let Some(events) = self.events_tx.take() else {
            tracing::warn!("push session already ran once; ignoring connect()");
            return;
        };
        let endpoint = match push_endpoint(&self.origin, &self.config.endpoint_path) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, origin = %self.origin, "cannot derive push endpoint");
                return;
            }
        };

        let ctx = SessionCtx {
            endpoint,
            user_id,
            policy: self.config.reconnect,
            transport: self.transport.clone(),
            sleeper: self.sleeper.clone(),
            events,
            status: self.status_tx.clone(),
        };
        let shutdown = self.shutdown_tx.subscribe();
        self.task = Some(tokio::spawn(run_session(ctx, shutdown)));
    }

    /// Tear the session down
    ///
    /// Cancels any pending backoff sleep, closes the socket if one is open
    /// and waits for the session task to finish. Safe to call from any
    /// state and idempotent; the instance cannot be reconnected afterwards.
    pub async fn disconnect(&mut self) {
        self.shutdown_tx.send_replace(true);
        // Closing our sender half ends downstream event consumers even if
        // the session never started.
        self.events_tx = None;
        if let Some(task) = self.task.take() {
            if task.await.is_err() {
                tracing::debug!("push session task ended abnormally");
            }
        }
        self.status_tx
            .send_if_modified(|status| set_status(status, ChannelStatus::PollOnly));
    }
}

struct SessionCtx {
    endpoint: Url,
    user_id: String,
    policy: ReconnectPolicy,
    transport: Arc<dyn PushTransport>,
    sleeper: Arc<dyn Sleeper>,
    events: mpsc::Sender<PushEvent>,
    status: watch::Sender<ChannelStatus>,
}

fn set_status(current: &mut ChannelStatus, next: ChannelStatus) -> bool {
    if *current == next {
        false
    } else {
        *current = next;
        true
    }
}

fn publish(ctx: &SessionCtx, state: &ConnectionState) {
    ctx.status
        .send_if_modified(|status| set_status(status, state.status()));
}

async fn run_session(ctx: SessionCtx, mut shutdown: watch::Receiver<bool>) {
    let mut state = ConnectionState::Idle;
    let mut attempt: u32 = 0;

    'session: loop {
        state.on_connecting();
        publish(&ctx, &state);

        let dialed = tokio::select! {
            _ = shutdown.wait_for(|stop| *stop) => break 'session,
            dialed = ctx.transport.connect(&ctx.endpoint) => dialed,
        };

        match dialed {
            Ok(mut socket) => {
                attempt = 0;
                state.on_open();
                publish(&ctx, &state);
                tracing::info!(endpoint = %ctx.endpoint, "push channel open");

                let auth = ClientMessage::Auth {
                    user_id: ctx.user_id.clone(),
                };
                let auth_sent = match auth.to_json() {
                    Ok(frame) => match socket.send_text(frame).await {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::debug!(error = %e, "failed to send auth frame");
                            false
                        }
                    },
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to encode auth frame");
                        false
                    }
                };

                if auth_sent {
                    loop {
                        tokio::select! {
                            _ = async { let _ = shutdown.wait_for(|stop| *stop).await; } => {
                                socket.close().await;
                                break 'session;
                            }
                            frame = socket.next_text() => match frame {
                                Some(Ok(text)) => handle_frame(&ctx, &mut state, &text).await,
                                Some(Err(e)) => {
                                    tracing::debug!(error = %e, "push channel receive error");
                                    break;
                                }
                                None => {
                                    tracing::debug!("push channel closed by peer");
                                    break;
                                }
                            }
                        }
                    }
                }
                // Socket handle drops here; the authenticated flag is
                // cleared by the transition below.
            }
            Err(e) => {
                tracing::debug!(error = %e, attempt, "push channel connect failed");
            }
        }

        match state.on_close(attempt, &ctx.policy) {
            Some(delay) => {
                publish(&ctx, &state);
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "scheduling push reconnect"
                );
                tokio::select! {
                    _ = shutdown.wait_for(|stop| *stop) => break 'session,
                    _ = ctx.sleeper.sleep(delay) => {}
                }
                attempt += 1;
            }
            None => {
                publish(&ctx, &state);
                tracing::warn!(
                    attempts = ctx.policy.max_attempts,
                    "push reconnect attempts exhausted; feed is poll-only"
                );
                return;
            }
        }
    }

    state.on_disconnect();
    publish(&ctx, &state);
}

async fn handle_frame(ctx: &SessionCtx, state: &mut ConnectionState, text: &str) {
    match ServerMessage::from_json(text) {
        Ok(ServerMessage::AuthSuccess { client_id }) => {
            if state.on_auth_success() {
                tracing::info!(client_id = ?client_id, "push channel authenticated");
            }
            let _ = ctx.events.send(PushEvent::AuthSucceeded { client_id }).await;
        }
        Ok(ServerMessage::NewNotification { notification }) => {
            let _ = ctx
                .events
                .send(PushEvent::NotificationReceived(notification))
                .await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "dropping malformed push frame");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PushError, PushSocket};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn sample_notification(id: &str) -> Notification {
        use quotify_wire::NotificationKind;
        Notification {
            id: id.to_string(),
            user_id: "supplier-17".to_string(),
            kind: NotificationKind::QuoteSubmitted,
            title: "Quote submitted".to_string(),
            message: "A quote arrived.".to_string(),
            related_quote_id: None,
            related_request_id: None,
            is_read: false,
            created_at: chrono::Utc::now(),
        }
    }

    fn notification_frame(id: &str) -> String {
        serde_json::to_string(&ServerMessage::NewNotification {
            notification: sample_notification(id),
        })
        .unwrap()
    }

    enum Step {
        Fail,
        Open(ScriptSocket),
    }

    struct ScriptSocket {
        frames: VecDeque<String>,
        hang_after: bool,
        sent: Arc<Mutex<Vec<String>>>,
        closed: Arc<AtomicBool>,
    }

    impl ScriptSocket {
        fn new(frames: Vec<String>, hang_after: bool) -> Self {
            Self {
                frames: frames.into(),
                hang_after,
                sent: Arc::new(Mutex::new(Vec::new())),
                closed: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl PushSocket for ScriptSocket {
        async fn send_text(&mut self, text: String) -> Result<(), PushError> {
            self.sent.lock().unwrap().push(text);
            Ok(())
        }

        async fn next_text(&mut self) -> Option<Result<String, PushError>> {
            if let Some(frame) = self.frames.pop_front() {
                return Some(Ok(frame));
            }
            if self.hang_after {
                std::future::pending::<()>().await;
            }
            None
        }

        async fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    struct ScriptTransport {
        steps: Mutex<VecDeque<Step>>,
        dials: AtomicUsize,
    }

    impl ScriptTransport {
        fn new(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                steps: Mutex::new(steps.into()),
                dials: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PushTransport for ScriptTransport {
        async fn connect(&self, _url: &Url) -> Result<Box<dyn PushSocket>, PushError> {
            self.dials.fetch_add(1, Ordering::SeqCst);
            match self.steps.lock().unwrap().pop_front() {
                Some(Step::Open(socket)) => Ok(Box::new(socket)),
                Some(Step::Fail) | None => Err(PushError::connect_failed("scripted failure")),
            }
        }
    }

    /// Records requested delays and returns immediately.
    struct InstantSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl InstantSleeper {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                delays: Mutex::new(Vec::new()),
            })
        }

        fn recorded_ms(&self) -> Vec<u64> {
            self.delays
                .lock()
                .unwrap()
                .iter()
                .map(|d| d.as_millis() as u64)
                .collect()
        }
    }

    #[async_trait]
    impl Sleeper for InstantSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }

    /// Records the call then parks forever; only shutdown can get past it.
    struct HangSleeper {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Sleeper for HangSleeper {
        async fn sleep(&self, _duration: Duration) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<()>().await;
        }
    }

    fn test_client(
        transport: Arc<dyn PushTransport>,
        sleeper: Arc<dyn Sleeper>,
    ) -> PushClient {
        let origin = Url::parse("https://portal.quotify.example").unwrap();
        PushClient::new(origin, Some("supplier-17".to_string()), PushConfig::default())
            .with_transport(transport)
            .with_sleeper(sleeper)
    }

    /// Wait for the session task to run to completion (give-up).
    async fn wait_session_end(client: &mut PushClient) {
        let task = client.task.take().expect("session task running");
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("session did not end")
            .expect("session task panicked");
    }

    #[tokio::test]
    async fn backoff_schedule_then_give_up() {
        let transport = ScriptTransport::new(vec![]);
        let sleeper = InstantSleeper::new();
        let mut client = test_client(transport.clone(), sleeper.clone());
        client.connect();

        wait_session_end(&mut client).await;
        assert_eq!(sleeper.recorded_ms(), vec![1000, 2000, 4000, 8000, 16000]);
        // 1 initial dial + 5 scheduled reconnects
        assert_eq!(transport.dials.load(Ordering::SeqCst), 6);
        assert_eq!(*client.status().borrow(), ChannelStatus::PollOnly);
    }

    #[tokio::test]
    async fn attempt_counter_resets_on_successful_open() {
        let transport = ScriptTransport::new(vec![
            Step::Fail,
            Step::Fail,
            Step::Open(ScriptSocket::new(vec![], false)),
        ]);
        let sleeper = InstantSleeper::new();
        let mut client = test_client(transport, sleeper.clone());
        client.connect();

        wait_session_end(&mut client).await;
        assert_eq!(
            sleeper.recorded_ms(),
            vec![1000, 2000, 1000, 2000, 4000, 8000, 16000]
        );
    }

    #[tokio::test]
    async fn auth_frame_sent_first_and_events_delivered() {
        let socket = ScriptSocket::new(
            vec![
                r#"{"type":"auth_success","clientId":"c-9"}"#.to_string(),
                notification_frame("n-1"),
                "{not json".to_string(),
                notification_frame("n-2"),
            ],
            false,
        );
        let sent = socket.sent.clone();
        let transport = ScriptTransport::new(vec![Step::Open(socket)]);
        let sleeper = InstantSleeper::new();
        let mut client = test_client(transport, sleeper);
        let mut events = client.events().expect("events available once");
        client.connect();

        let first = events.recv().await.expect("auth event");
        assert!(matches!(
            first,
            PushEvent::AuthSucceeded { ref client_id } if client_id.as_deref() == Some("c-9")
        ));

        let mut received = Vec::new();
        while let Some(event) = events.recv().await {
            if let PushEvent::NotificationReceived(n) = event {
                received.push(n.id);
            }
        }
        // The malformed frame was dropped without killing the connection.
        assert_eq!(received, vec!["n-1".to_string(), "n-2".to_string()]);

        assert_eq!(
            sent.lock().unwrap().first().map(String::as_str),
            Some(r#"{"type":"auth","userId":"supplier-17"}"#)
        );
    }

    #[tokio::test]
    async fn disconnect_closes_socket_and_is_idempotent() {
        let socket = ScriptSocket::new(vec![], true);
        let closed = socket.closed.clone();
        let transport = ScriptTransport::new(vec![Step::Open(socket)]);
        let sleeper = InstantSleeper::new();
        let mut client = test_client(transport, sleeper);
        client.connect();

        let mut status = client.status();
        tokio::time::timeout(
            Duration::from_secs(2),
            status.wait_for(|s| *s == ChannelStatus::Connected),
        )
        .await
        .expect("never connected")
        .expect("status channel closed");

        tokio::time::timeout(Duration::from_secs(2), client.disconnect())
            .await
            .expect("disconnect hung");
        assert!(closed.load(Ordering::SeqCst));
        assert!(client.task.is_none());
        assert_eq!(*client.status().borrow(), ChannelStatus::PollOnly);

        // Second call is a no-op.
        tokio::time::timeout(Duration::from_secs(2), client.disconnect())
            .await
            .expect("second disconnect hung");
    }

    #[tokio::test]
    async fn disconnect_cancels_pending_reconnect_sleep() {
        let transport = ScriptTransport::new(vec![]);
        let sleeper = Arc::new(HangSleeper {
            calls: AtomicUsize::new(0),
        });
        let mut client = test_client(transport, sleeper.clone());
        client.connect();

        // Let the session reach the parked backoff sleep.
        while sleeper.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        tokio::time::timeout(Duration::from_secs(2), client.disconnect())
            .await
            .expect("disconnect did not cancel the pending sleep");
        assert_eq!(sleeper.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connect_without_user_id_is_a_no_op() {
        let transport = ScriptTransport::new(vec![]);
        let origin = Url::parse("https://portal.quotify.example").unwrap();
        let mut client = PushClient::new(origin, None, PushConfig::default())
            .with_transport(transport.clone());
        client.connect();
        assert!(client.task.is_none());
        assert_eq!(transport.dials.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn connect_when_disabled_is_a_no_op() {
        let transport = ScriptTransport::new(vec![]);
        let origin = Url::parse("https://portal.quotify.example").unwrap();
        let config = PushConfig::default().enabled(false);
        let mut client = PushClient::new(origin, Some("supplier-17".to_string()), config)
            .with_transport(transport.clone());
        client.connect();
        assert!(client.task.is_none());
        assert_eq!(transport.dials.load(Ordering::SeqCst), 0);
    }
}

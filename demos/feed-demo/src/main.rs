//! Feed Demo
//!
//! Runs the full notification stack against a live portal origin:
//! HTTP pulls, push channel with reconnection, sound cues.
//!
//! Run with:
//!   cargo run -p feed-demo -- --origin http://localhost:8080 --user-id supplier-17
//!
//! Set RUST_LOG=debug to watch the push channel state transitions.

use clap::Parser;
use quotify_client::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "feed-demo", about = "Run the Quotify notification feed")]
struct Args {
    /// Portal origin, e.g. https://portal.quotify.example
    #[arg(long)]
    origin: Url,

    /// User id of the session owner
    #[arg(long)]
    user_id: String,

    /// Backstop polling interval in seconds
    #[arg(long, default_value_t = 30)]
    poll_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let api = Arc::new(HttpNotificationsApi::new(args.origin.clone()));
    let store = NotificationStore::new(
        api,
        args.user_id.clone(),
        StoreConfig::default().poll_interval(Duration::from_secs(args.poll_secs)),
    );
    let push = PushClient::new(args.origin, Some(args.user_id), PushConfig::default());

    let mut feed = FeedPresenter::with_sound(store, push);
    let mut snapshots = feed.subscribe();
    let mut status = feed.channel_status();
    feed.mount();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow().clone();
                render(&snapshot);
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                tracing::info!(status = ?*status.borrow(), "push channel status");
            }
        }
    }

    tracing::info!("shutting down");
    feed.unmount().await;
    Ok(())
}

fn render(snapshot: &FeedSnapshot) {
    println!(
        "-- {} notifications, {} unread --",
        snapshot.notifications.len(),
        snapshot.unread_count
    );
    for n in &snapshot.notifications {
        let marker = if n.is_read { ' ' } else { '*' };
        println!("{} [{}] {}: {}", marker, n.created_at, n.title, n.message);
    }
}

//! Socket transport and clock seams
//!
//! The session loop only sees these traits, so tests can drive it with
//! scripted sockets and an instant clock instead of real networking and
//! timers.

use crate::PushError;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

/// One open push socket
#[async_trait]
pub trait PushSocket: Send {
    /// Send a text frame
    async fn send_text(&mut self, text: String) -> Result<(), PushError>;

    /// Receive the next text frame
    ///
    /// `None` means the connection is closed. Control frames are an
    /// implementation detail of the transport and never surface here.
    async fn next_text(&mut self) -> Option<Result<String, PushError>>;

    /// Close the socket
    async fn close(&mut self);
}

/// Something that can dial the push endpoint
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Open a connection to `url`
    async fn connect(&self, url: &Url) -> Result<Box<dyn PushSocket>, PushError>;
}

/// Clock seam for the backoff sleeps
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Sleep for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Default [`Sleeper`] backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Default transport over tokio-tungstenite
#[derive(Debug, Clone, Copy, Default)]
pub struct WsTransport;

#[async_trait]
impl PushTransport for WsTransport {
    async fn connect(&self, url: &Url) -> Result<Box<dyn PushSocket>, PushError> {
        let (stream, _response) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| PushError::connect_failed(e.to_string()))?;
        Ok(Box::new(WsSocket { inner: stream }))
    }
}

struct WsSocket {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl PushSocket for WsSocket {
    async fn send_text(&mut self, text: String) -> Result<(), PushError> {
        self.inner
            .send(tungstenite::Message::Text(text))
            .await
            .map_err(|e| PushError::send_failed(e.to_string()))
    }

    async fn next_text(&mut self) -> Option<Result<String, PushError>> {
        loop {
            match self.inner.next().await {
                Some(Ok(tungstenite::Message::Text(text))) => return Some(Ok(text)),
                Some(Ok(tungstenite::Message::Close(_))) => return None,
                // Ping/pong are answered inside tungstenite; binary frames
                // are not part of the push protocol.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Some(Err(PushError::receive_failed(e.to_string()))),
                None => return None,
            }
        }
    }

    async fn close(&mut self) {
        let _ = self.inner.close(None).await;
    }
}

//! Channel lifecycle manager for the upstream shelf-state stream.
//!
//! Owns exactly one logical WebSocket connection and translates transport
//! events into typed signals for the view model. Payloads pass through
//! unparsed; this module knows nothing about shelf semantics. Reconnection
//! is deliberately not handled here: the caller may open a fresh channel
//! after a close or error.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Signals raised by the channel, delivered FIFO to a single consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Fires exactly once per successful connection establishment.
    Connected,
    /// One inbound text message, payload unmodified and unparsed.
    Message(String),
    /// Graceful closure by the server or end of stream.
    Closed,
    /// Transport failure, including failure to establish the connection.
    Errored(String),
}

/// Handle to a live channel. Dropping the handle leaves the task running;
/// call [`ChannelHandle::close`] to tear it down.
pub struct ChannelHandle {
    task: JoinHandle<()>,
}

impl ChannelHandle {
    /// Abort the connection task. The event receiver sees end-of-stream.
    pub fn close(self) {
        self.task.abort();
    }
}

/// Supervisor for a single logical channel to a configured endpoint.
///
/// Invariant: one channel per manager. `open` must not be called again
/// until the previous channel has closed or errored.
pub struct ChannelManager;

impl ChannelManager {
    /// Initiate a connection to `endpoint`. Returns immediately; failure
    /// to establish is reported asynchronously as
    /// [`ChannelEvent::Errored`], never as an error from `open` itself.
    pub fn open(endpoint: String) -> (ChannelHandle, mpsc::UnboundedReceiver<ChannelEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            connect_and_stream(endpoint, event_tx).await;
        });

        (ChannelHandle { task }, event_rx)
    }
}

async fn connect_and_stream(endpoint: String, event_tx: mpsc::UnboundedSender<ChannelEvent>) {
    info!("🔌 Connecting to shelf-state stream at {endpoint}");

    let ws_stream = match connect_async(endpoint.as_str()).await {
        Ok((stream, resp)) => {
            info!("✅ Shelf-state stream connected (status={})", resp.status());
            stream
        }
        Err(e) => {
            warn!(error = %e, "shelf-state stream connect failed");
            let _ = event_tx.send(ChannelEvent::Errored(e.to_string()));
            return;
        }
    };

    let _ = event_tx.send(ChannelEvent::Connected);

    let (mut write, mut read) = ws_stream.split();

    while let Some(ws_msg) = read.next().await {
        match ws_msg {
            Ok(Message::Text(text)) => {
                if event_tx.send(ChannelEvent::Message(text)).is_err() {
                    // Consumer went away; nothing left to deliver to.
                    return;
                }
            }
            Ok(Message::Ping(payload)) => {
                let _ = write.send(Message::Pong(payload)).await;
            }
            Ok(Message::Pong(_)) => {
                debug!("shelf-state stream pong");
            }
            Ok(Message::Close(frame)) => {
                info!(?frame, "shelf-state stream closed by server");
                let _ = event_tx.send(ChannelEvent::Closed);
                return;
            }
            Ok(Message::Binary(data)) => {
                warn!("unexpected binary frame on shelf-state stream: {} bytes", data.len());
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "shelf-state stream read error");
                let _ = event_tx.send(ChannelEvent::Errored(e.to_string()));
                return;
            }
        }
    }

    // Stream ended without a close frame.
    let _ = event_tx.send(ChannelEvent::Closed);
}

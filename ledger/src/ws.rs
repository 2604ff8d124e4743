//! WebSocket implementation of the event stream.
//!
//! Connects lazily and reconnects after delivery errors: the subscription
//! must outlive any single broken connection. On connect, a subscribe frame
//! for both event topics is sent; incoming text frames are decoded as
//! [`LedgerEvent`]s and anything else on the wire is skipped.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::error::LedgerError;
use crate::events::{EventStream, LedgerEvent};

type WsConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Event subscription over a WebSocket endpoint.
pub struct WsEventStream {
    url: String,
    conn: Option<WsConnection>,
}

impl WsEventStream {
    /// Create a stream for the given endpoint. No connection is made until
    /// the first [`next_event`](EventStream::next_event) call.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            conn: None,
        }
    }

    async fn connect(&mut self) -> Result<&mut WsConnection, LedgerError> {
        if self.conn.is_none() {
            let (mut conn, _) = connect_async(&self.url)
                .await
                .map_err(|e| LedgerError::Subscription(format!("connect failed: {e}")))?;

            let subscribe = serde_json::json!({
                "action": "subscribe",
                "topics": ["vote_cast", "winner_declared"],
            });
            conn.send(Message::Text(subscribe.to_string()))
                .await
                .map_err(|e| LedgerError::Subscription(format!("subscribe failed: {e}")))?;

            debug!(url = %self.url, "subscribed to ledger events");
            return Ok(self.conn.insert(conn));
        }
        match self.conn.as_mut() {
            Some(conn) => Ok(conn),
            None => Err(LedgerError::Subscription("connection unavailable".into())),
        }
    }
}

#[async_trait::async_trait]
impl EventStream for WsEventStream {
    async fn next_event(&mut self) -> Result<LedgerEvent, LedgerError> {
        loop {
            let conn = self.connect().await?;
            match conn.next().await {
                Some(Ok(Message::Text(text))) => match serde_json::from_str(&text) {
                    Ok(event) => return Ok(event),
                    Err(e) => {
                        // Non-event frames (acks, heartbeats) are expected.
                        debug!(error = %e, "skipping non-event frame");
                    }
                },
                Some(Ok(Message::Ping(payload))) => {
                    if let Err(e) = conn.send(Message::Pong(payload)).await {
                        self.conn = None;
                        return Err(LedgerError::Subscription(format!("pong failed: {e}")));
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    self.conn = None;
                    return Err(LedgerError::Subscription("connection closed".into()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    self.conn = None;
                    return Err(LedgerError::Subscription(format!("receive failed: {e}")));
                }
            }
        }
    }
}

//! Nullable event stream — events arrive when the test injects them.

use agora_ledger::{EventStream, LedgerError, LedgerEvent};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Test-side handle for injecting events into a [`NullEventStream`].
#[derive(Clone)]
pub struct NullEventPublisher {
    tx: mpsc::UnboundedSender<Result<LedgerEvent, LedgerError>>,
}

impl NullEventPublisher {
    /// Deliver an event to the subscriber.
    pub fn publish(&self, event: LedgerEvent) {
        let _ = self.tx.send(Ok(event));
    }

    /// Deliver a channel error to the subscriber.
    pub fn publish_error(&self, message: &str) {
        let _ = self
            .tx
            .send(Err(LedgerError::Subscription(message.to_string())));
    }
}

/// A deterministic event subscription fed by a [`NullEventPublisher`].
pub struct NullEventStream {
    rx: mpsc::UnboundedReceiver<Result<LedgerEvent, LedgerError>>,
}

impl NullEventStream {
    /// Create a connected stream/publisher pair.
    pub fn channel() -> (Self, NullEventPublisher) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, NullEventPublisher { tx })
    }
}

#[async_trait]
impl EventStream for NullEventStream {
    async fn next_event(&mut self) -> Result<LedgerEvent, LedgerError> {
        match self.rx.recv().await {
            Some(result) => result,
            None => Err(LedgerError::Subscription("publisher dropped".into())),
        }
    }
}

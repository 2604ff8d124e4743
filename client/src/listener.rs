//! Event listener — turns contract events into resync triggers.

use std::time::Duration;

use agora_ledger::{EventStream, LedgerEvent};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::coordinator::Trigger;
use crate::notice::{Notice, Notifier};

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Consumes the contract event subscription.
///
/// Events never carry state; each one just schedules a resync, so the
/// snapshot is always rebuilt from an authoritative read. A broken
/// subscription is retried after a short delay — the poller keeps the
/// client alive in the meantime.
pub struct EventListener {
    events: Box<dyn EventStream>,
    triggers: mpsc::Sender<Trigger>,
    notices: Notifier,
}

impl EventListener {
    pub fn new(
        events: Box<dyn EventStream>,
        triggers: mpsc::Sender<Trigger>,
        notices: Notifier,
    ) -> Self {
        Self {
            events,
            triggers,
            notices,
        }
    }

    /// Run until shutdown.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            let event = tokio::select! {
                _ = shutdown.recv() => {
                    debug!("event listener shutting down");
                    return;
                }
                event = self.events.next_event() => event,
            };

            match event {
                Ok(event) => self.handle(event).await,
                Err(e) => {
                    warn!(error = %e, "event subscription failed, retrying");
                    tokio::select! {
                        _ = shutdown.recv() => return,
                        _ = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            }
        }
    }

    async fn handle(&mut self, event: LedgerEvent) {
        debug!(?event, "contract event");
        match event {
            LedgerEvent::VoteCast { proposal_index } => {
                self.notices.publish(Notice::VoteCast { proposal_index });
            }
            LedgerEvent::WinnerDeclared { winner_name } => {
                self.notices.publish(Notice::WinnerDeclared { winner_name });
            }
        }
        let _ = self.triggers.send(Trigger::RemoteEvent).await;
    }
}

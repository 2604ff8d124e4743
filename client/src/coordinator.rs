//! Synchronization coordinator — the heart of the client.
//!
//! All resynchronization requests, whatever their origin, funnel through one
//! trigger channel into this task. The coordinator runs at most one pull at a
//! time; triggers arriving mid-pull coalesce into a single follow-up pull, so
//! a burst of N triggers costs at most two passes over the remote state.

use std::sync::Arc;

use agora_types::{Address, ChainId, LedgerParams, WalletStatus};
use agora_ledger::ProposalLedger;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::notice::{Notice, Notifier};
use crate::reader;
use crate::view::{ClientView, SyncPhase};

/// A request to resynchronize local state with the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Initial pull at startup.
    Bootstrap,
    /// The identity monitor observed a wallet status transition.
    IdentityChanged(WalletStatus),
    /// A contract event arrived on the subscription.
    RemoteEvent,
    /// A state-changing operation was committed.
    WriteCompleted,
}

/// Owns the authoritative [`ClientView`] and serializes pulls against it.
pub struct SyncCoordinator {
    ledger: Arc<dyn ProposalLedger>,
    triggers: mpsc::Receiver<Trigger>,
    view_tx: watch::Sender<ClientView>,
    notices: Notifier,
    superuser: Address,
    expected_chain: ChainId,
    params: LedgerParams,
    wallet: WalletStatus,
    phase: SyncPhase,
    snapshot: Option<agora_types::Snapshot>,
    pending: bool,
}

impl SyncCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ledger: Arc<dyn ProposalLedger>,
        triggers: mpsc::Receiver<Trigger>,
        view_tx: watch::Sender<ClientView>,
        notices: Notifier,
        superuser: Address,
        expected_chain: ChainId,
        params: LedgerParams,
    ) -> Self {
        Self {
            ledger,
            triggers,
            view_tx,
            notices,
            superuser,
            expected_chain,
            params,
            wallet: WalletStatus::Unavailable,
            phase: SyncPhase::Uninitialized,
            snapshot: None,
            pending: false,
        }
    }

    /// Run until shutdown or until every trigger sender is dropped.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            let trigger = tokio::select! {
                _ = shutdown.recv() => {
                    debug!("sync coordinator shutting down");
                    return;
                }
                trigger = self.triggers.recv() => match trigger {
                    Some(t) => t,
                    None => return,
                },
            };

            self.absorb(trigger);
            self.drain();
            // Triggers that land while a pull is in flight set `pending`
            // again; one more pass covers them all.
            while self.pending {
                self.pending = false;
                self.sync_once().await;
                self.drain();
            }
        }
    }

    /// Fold one trigger into the coordinator's state.
    fn absorb(&mut self, trigger: Trigger) {
        debug!(?trigger, "absorbing trigger");
        if let Trigger::IdentityChanged(status) = trigger {
            if !status.is_connected() {
                // No identity means nothing scoped to render.
                self.snapshot = None;
                self.phase = SyncPhase::Uninitialized;
            }
            self.wallet = status;
        }
        self.pending = true;
    }

    /// Absorb everything already queued without blocking.
    fn drain(&mut self) {
        while let Ok(trigger) = self.triggers.try_recv() {
            self.absorb(trigger);
        }
    }

    async fn sync_once(&mut self) {
        let Some(account) = self.wallet.address().cloned() else {
            self.publish();
            return;
        };

        self.phase = SyncPhase::Syncing;
        self.publish();

        match reader::pull(
            self.ledger.as_ref(),
            &account,
            &self.superuser,
            self.expected_chain,
            &self.params,
        )
        .await
        {
            Ok(snapshot) => {
                if !snapshot.network_ok {
                    self.notices.publish(Notice::WrongNetwork {
                        expected: self.expected_chain,
                    });
                }
                info!(
                    proposals = snapshot.proposals.len(),
                    remaining = snapshot.round.remaining_votes,
                    "synchronized"
                );
                self.snapshot = Some(snapshot);
                self.phase = SyncPhase::Ready;
            }
            Err(e) => {
                // Keep the previous snapshot; stale beats torn.
                warn!(error = %e, "pull failed");
                self.notices.publish(Notice::ReadError(e.to_string()));
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.view_tx.send_replace(ClientView {
            phase: self.phase,
            wallet: self.wallet.clone(),
            snapshot: self.snapshot.clone(),
        });
    }
}

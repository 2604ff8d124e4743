//! Command dispatcher — user-initiated operations against the ledger.
//!
//! Every command is validated against the latest published view before it is
//! submitted. Client-side precondition failures and remote rejections both
//! surface as a [`Notice::Rejected`] naming the operation; a committed write
//! queues a [`Trigger::WriteCompleted`] so the coordinator re-reads remote
//! state instead of the dispatcher patching the snapshot locally.

use std::sync::Arc;

use agora_types::{Address, HistoryEntry, LedgerParams};
use agora_ledger::ProposalLedger;
use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::coordinator::Trigger;
use crate::error::ClientError;
use crate::notice::{Notice, Notifier};
use crate::reader;
use crate::shutdown::RestartController;
use crate::view::ClientView;

/// A user-initiated operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Stake the configured amount on the proposal at `index`.
    Vote { index: usize },
    EndVoting,
    DeclareWinner,
    ResetVoting,
    /// Withdraw the accumulated stake to the authority's account.
    Withdraw,
    TransferOwnership { new_owner: Address },
    Destroy,
    /// Read the archived round history (no identity required).
    FetchHistory,
}

impl Command {
    /// Human-readable operation name used in notices and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vote { .. } => "cast vote",
            Self::EndVoting => "end voting",
            Self::DeclareWinner => "declare winner",
            Self::ResetVoting => "reset voting",
            Self::Withdraw => "withdraw",
            Self::TransferOwnership { .. } => "transfer ownership",
            Self::Destroy => "destroy contract",
            Self::FetchHistory => "fetch history",
        }
    }
}

/// What a successfully executed command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The write was accepted; a resync will pick up its effects.
    Committed,
    /// The parsed history, newest round first.
    History(Vec<HistoryEntry>),
}

/// Validates and submits commands on behalf of the presentation adapter.
#[derive(Clone)]
pub struct CommandDispatcher {
    ledger: Arc<dyn ProposalLedger>,
    triggers: mpsc::Sender<Trigger>,
    notices: Notifier,
    view: watch::Receiver<ClientView>,
    restart: RestartController,
    params: LedgerParams,
}

impl CommandDispatcher {
    pub fn new(
        ledger: Arc<dyn ProposalLedger>,
        triggers: mpsc::Sender<Trigger>,
        notices: Notifier,
        view: watch::Receiver<ClientView>,
        restart: RestartController,
        params: LedgerParams,
    ) -> Self {
        Self {
            ledger,
            triggers,
            notices,
            view,
            restart,
            params,
        }
    }

    /// Execute one command end to end.
    pub async fn execute(&self, command: Command) -> Result<Outcome, ClientError> {
        if command == Command::FetchHistory {
            return self.fetch_history().await;
        }

        let operation = command.name();
        let view = self.view.borrow().clone();
        let Some(account) = view.wallet.address().cloned() else {
            self.reject(operation, "no wallet account connected");
            return Err(ClientError::NotConnected);
        };

        if let Some(snapshot) = &view.snapshot {
            if let Err(reason) = precondition(&command, snapshot) {
                self.reject(operation, reason);
                return Err(ClientError::Precondition { operation, reason });
            }
        }

        let result = match &command {
            Command::Vote { index } => {
                self.ledger
                    .vote(&account, *index, self.params.vote_stake)
                    .await
            }
            Command::EndVoting => self.ledger.end_voting(&account).await,
            Command::DeclareWinner => self.ledger.declare_winner(&account).await,
            Command::ResetVoting => self.ledger.reset_voting(&account).await,
            Command::Withdraw => self.ledger.withdraw(&account).await,
            Command::TransferOwnership { new_owner } => {
                self.ledger.transfer_ownership(&account, new_owner).await
            }
            Command::Destroy => self.ledger.destroy(&account).await,
            Command::FetchHistory => unreachable!("handled above"),
        };

        match result {
            Ok(()) => {
                info!(operation, "command committed");
                self.notices.publish(Notice::Committed { operation });
                let _ = self.triggers.send(Trigger::WriteCompleted).await;
                if matches!(command, Command::TransferOwnership { .. }) {
                    self.notices.publish(Notice::RestartRequired);
                    self.restart.request();
                }
                Ok(Outcome::Committed)
            }
            Err(e) => {
                self.notices.publish(Notice::Rejected {
                    operation,
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    async fn fetch_history(&self) -> Result<Outcome, ClientError> {
        let operation = Command::FetchHistory.name();
        let raw = self.ledger.voting_history().await.map_err(|e| {
            self.notices.publish(Notice::Rejected {
                operation,
                reason: e.to_string(),
            });
            ClientError::from(e)
        })?;
        let history =
            reader::parse_history(&raw, self.params.history_display_limit).map_err(|e| {
                self.notices.publish(Notice::Rejected {
                    operation,
                    reason: e.to_string(),
                });
                ClientError::from(e)
            })?;
        self.notices.publish(Notice::HistoryFetched {
            rounds: history.len(),
        });
        Ok(Outcome::History(history))
    }

    fn reject(&self, operation: &'static str, reason: &str) {
        self.notices.publish(Notice::Rejected {
            operation,
            reason: reason.to_string(),
        });
    }
}

/// Client-side validation against the latest snapshot.
///
/// Only runs when a snapshot exists; with no snapshot yet the write goes
/// straight to the contract, which enforces the same rules authoritatively.
fn precondition(command: &Command, snapshot: &agora_types::Snapshot) -> Result<(), &'static str> {
    let authorized = snapshot.authority.caller_is_authorized;
    match command {
        Command::Vote { index } => {
            if authorized {
                // The authority administers the round and does not vote in it.
                return Err("the contract authority cannot vote");
            }
            if snapshot.round.voting_ended {
                return Err("voting has ended");
            }
            if snapshot.round.remaining_votes == 0 {
                return Err("no votes remaining for this account");
            }
            if *index >= snapshot.proposals.len() {
                return Err("no proposal at that index");
            }
            Ok(())
        }
        Command::EndVoting => {
            if !authorized {
                Err("caller is not the contract authority")
            } else if snapshot.round.voting_ended {
                Err("voting has already ended")
            } else {
                Ok(())
            }
        }
        Command::DeclareWinner => {
            if !authorized {
                Err("caller is not the contract authority")
            } else if !snapshot.round.voting_ended {
                Err("voting is still open")
            } else {
                Ok(())
            }
        }
        Command::ResetVoting
        | Command::Withdraw
        | Command::TransferOwnership { .. }
        | Command::Destroy => {
            if !authorized {
                Err("caller is not the contract authority")
            } else {
                Ok(())
            }
        }
        Command::FetchHistory => Ok(()),
    }
}

//! Transient notifications surfaced to the presentation adapter.
//!
//! Every failure in the system ends up here as a human-readable line naming
//! the attempted operation; nothing fails silently.

use std::fmt;

use agora_types::{Address, ChainId};
use tokio::sync::mpsc;
use tracing::warn;

/// A transient notification for the presentation adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// No wallet integration is present; nothing will work until one is.
    WalletUnavailable,
    /// The wallet is present but no account is connected.
    WalletDisconnected,
    /// The active account changed.
    AccountChanged(Address),
    /// The wallet or endpoint is pointed at the wrong chain.
    WrongNetwork { expected: ChainId },
    /// A synchronization pull failed; the previous snapshot is still shown.
    ReadError(String),
    /// A state-changing operation was accepted by the remote ledger.
    Committed { operation: &'static str },
    /// An operation was rejected, client-side or remotely.
    Rejected {
        operation: &'static str,
        reason: String,
    },
    /// A vote-cast event arrived from the contract.
    VoteCast { proposal_index: u64 },
    /// A winner-declared event arrived from the contract.
    WinnerDeclared { winner_name: String },
    /// Voting history was fetched and is ready to render.
    HistoryFetched { rounds: usize },
    /// Ownership changed; the client must be restarted.
    RestartRequired,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WalletUnavailable => {
                write!(f, "Please install a wallet to use this application.")
            }
            Self::WalletDisconnected => {
                write!(f, "Please connect your wallet to this application.")
            }
            Self::AccountChanged(addr) => write!(f, "Active account is now {addr}."),
            Self::WrongNetwork { expected } => {
                write!(f, "Please connect to the expected network (chain id {expected}).")
            }
            Self::ReadError(reason) => write!(f, "Error loading ledger state: {reason}"),
            Self::Committed { operation } => write!(f, "{operation} succeeded."),
            Self::Rejected { operation, reason } => write!(f, "{operation} failed: {reason}"),
            Self::VoteCast { proposal_index } => {
                write!(f, "New vote cast on proposal index {proposal_index}.")
            }
            Self::WinnerDeclared { winner_name } => write!(f, "The winner is: {winner_name}"),
            Self::HistoryFetched { rounds } => {
                write!(f, "Fetched voting history ({rounds} rounds).")
            }
            Self::RestartRequired => {
                write!(f, "Ownership transferred — restarting the client.")
            }
        }
    }
}

/// Sending half of the notice channel, shared by all core components.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<Notice>,
}

impl Notifier {
    /// Create a notifier and the receiver the presentation adapter consumes.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Publish a notice without blocking the core.
    ///
    /// If the presentation side has fallen behind (or gone away), the notice
    /// is dropped with a warning rather than stalling synchronization.
    pub fn publish(&self, notice: Notice) {
        if let Err(e) = self.tx.try_send(notice) {
            warn!(notice = %e, "dropping notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_notice_names_the_operation() {
        let notice = Notice::Rejected {
            operation: "cast vote",
            reason: "voting has ended".into(),
        };
        assert_eq!(notice.to_string(), "cast vote failed: voting has ended");
    }

    #[test]
    fn wrong_network_names_expected_chain() {
        let notice = Notice::WrongNetwork {
            expected: ChainId::SEPOLIA,
        };
        assert!(notice.to_string().contains("11155111"));
    }

    #[tokio::test]
    async fn publish_delivers_in_order() {
        let (notifier, mut rx) = Notifier::channel(8);
        notifier.publish(Notice::WalletUnavailable);
        notifier.publish(Notice::WalletDisconnected);
        assert_eq!(rx.recv().await, Some(Notice::WalletUnavailable));
        assert_eq!(rx.recv().await, Some(Notice::WalletDisconnected));
    }

    #[tokio::test]
    async fn publish_to_full_channel_drops_instead_of_blocking() {
        let (notifier, mut rx) = Notifier::channel(1);
        notifier.publish(Notice::WalletUnavailable);
        notifier.publish(Notice::WalletDisconnected); // dropped
        assert_eq!(rx.recv().await, Some(Notice::WalletUnavailable));
        assert!(rx.try_recv().is_err());
    }
}

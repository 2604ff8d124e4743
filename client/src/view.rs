//! The published client view.

use agora_types::{Snapshot, WalletStatus};

/// Where the coordinator's state machine currently is.
///
/// There is no terminal state while the process runs: `Ready` re-enters
/// `Syncing` on every trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    /// No pull has completed yet.
    Uninitialized,
    /// A pull is in flight, or the last one failed and we are showing
    /// stale-but-available state.
    Syncing,
    /// The snapshot reflects the most recent completed pull.
    Ready,
}

/// What the presentation adapter renders: the coordinator's phase, the
/// wallet condition, and the latest snapshot if any pull has succeeded.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientView {
    pub phase: SyncPhase,
    pub wallet: WalletStatus,
    pub snapshot: Option<Snapshot>,
}

impl ClientView {
    /// The view at process start, before anything has been observed.
    pub fn empty() -> Self {
        Self {
            phase: SyncPhase::Uninitialized,
            wallet: WalletStatus::Unavailable,
            snapshot: None,
        }
    }
}

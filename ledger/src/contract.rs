//! The voting contract surface.

use agora_types::{Address, Wei};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// One history entry as the remote encodes it: numerics as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHistoryEntry {
    pub round: String,
    #[serde(rename = "winnerName")]
    pub winner_name: String,
    #[serde(rename = "voteCount")]
    pub vote_count: String,
}

/// The remote proposal-voting contract.
///
/// Reads are idempotent and side-effect free; they may be issued repeatedly
/// without corrupting remote state. Writes require an authenticated `from`
/// identity and may be rejected by remote-side authorization or state
/// checks — the remote is always the final authority.
#[async_trait]
pub trait ProposalLedger: Send + Sync {
    // ── Read surface ────────────────────────────────────────────────────

    /// The contract owner address, as the remote encodes it.
    async fn owner(&self) -> Result<String, LedgerError>;

    /// The ordered proposal name list.
    async fn proposals(&self) -> Result<Vec<String>, LedgerError>;

    /// Vote counts co-indexed with [`proposals`](Self::proposals), as text.
    async fn proposal_votes(&self) -> Result<Vec<String>, LedgerError>;

    /// The declared winner name; empty before declaration.
    async fn winner(&self) -> Result<String, LedgerError>;

    /// Whether the current round has been ended.
    async fn voting_ended(&self) -> Result<bool, LedgerError>;

    /// How many votes the given identity has cast this round, as text.
    async fn voter_vote_count(&self, voter: &Address) -> Result<String, LedgerError>;

    /// The chain id of the network the contract endpoint serves, as text.
    async fn network_id(&self) -> Result<String, LedgerError>;

    /// The full append-only round history, oldest first.
    async fn voting_history(&self) -> Result<Vec<RawHistoryEntry>, LedgerError>;

    // ── Write surface ───────────────────────────────────────────────────

    /// Cast a vote for the proposal at `index`, attaching the fixed stake.
    async fn vote(&self, from: &Address, index: usize, stake: Wei) -> Result<(), LedgerError>;

    /// Close the current round.
    async fn end_voting(&self, from: &Address) -> Result<(), LedgerError>;

    /// Declare the winner of a closed round.
    async fn declare_winner(&self, from: &Address) -> Result<(), LedgerError>;

    /// Clear the winner and re-open voting.
    async fn reset_voting(&self, from: &Address) -> Result<(), LedgerError>;

    /// Withdraw accumulated stakes to the owner.
    async fn withdraw(&self, from: &Address) -> Result<(), LedgerError>;

    /// Hand contract authority to a new address.
    async fn transfer_ownership(
        &self,
        from: &Address,
        new_owner: &Address,
    ) -> Result<(), LedgerError>;

    /// Permanently deactivate the contract.
    async fn destroy(&self, from: &Address) -> Result<(), LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_history_entry_uses_remote_field_names() {
        let json = r#"{"round":"7","winnerName":"Alice","voteCount":"12"}"#;
        let entry: RawHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.round, "7");
        assert_eq!(entry.winner_name, "Alice");
        assert_eq!(entry.vote_count, "12");
    }
}

//! The snapshot data model — the client's single authoritative view of
//! remote state.
//!
//! A [`Snapshot`] is always produced by one complete synchronization pass and
//! replaced wholesale; no field is ever patched in from an older pass.

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// One proposal zipped with its vote count.
///
/// The remote contract exposes the proposal list and the vote-count list as
/// two co-indexed collections; this is the zipped element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalStanding {
    pub name: String,
    pub votes: u64,
    pub image_ref: String,
}

/// State of the current voting round, scoped to the caller identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub voting_ended: bool,
    /// The declared winner, `None` before declaration.
    pub winner: Option<String>,
    /// Votes the caller may still cast, always within `0..=max_votes_per_voter`.
    pub remaining_votes: u64,
}

/// Who controls the contract, and whether the caller is among them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityInfo {
    pub owner: Address,
    /// True iff the caller is the remote owner or the fixed superuser
    /// override identity. Dual authority is deliberate: the override holds
    /// even when the remote owner field says otherwise.
    pub caller_is_authorized: bool,
}

/// One completed round from the contract's append-only history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub round: u64,
    pub winner_name: String,
    pub vote_count: u64,
}

/// The aggregate view produced by one pull.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The identity this snapshot was read for.
    pub account: Address,
    /// Whether the remote chain id matched the expected one. A mismatch
    /// still yields a snapshot; it is surfaced, not fatal.
    pub network_ok: bool,
    pub authority: AuthorityInfo,
    pub proposals: Vec<ProposalStanding>,
    pub round: RoundState,
}

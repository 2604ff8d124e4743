//! Fixed parameters of the voting contract the client targets.

use crate::amount::Wei;
use serde::{Deserialize, Serialize};

/// Contract-side constants the client depends on.
///
/// These mirror what the deployed contract enforces; the client uses them
/// only for derived display state and precondition checks. The remote ledger
/// remains the final authority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Votes each identity may cast per round.
    pub max_votes_per_voter: u64,

    /// History entries retained for display, newest first.
    pub history_display_limit: usize,

    /// Stake attached to every vote.
    pub vote_stake: Wei,

    /// Base URL proposal image references are derived from.
    pub image_base_url: String,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            max_votes_per_voter: 5,
            history_display_limit: 10,
            vote_stake: Wei::VOTE_STAKE,
            image_base_url: "https://burndawitch.github.io/mai24021".to_string(),
        }
    }
}

impl LedgerParams {
    /// Image reference for a proposal, derived from the base URL.
    pub fn image_ref(&self, proposal_name: &str) -> String {
        format!("{}/{}.jpg", self.image_base_url, proposal_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let params = LedgerParams::default();
        assert_eq!(params.max_votes_per_voter, 5);
        assert_eq!(params.history_display_limit, 10);
        assert_eq!(params.vote_stake, Wei::VOTE_STAKE);
    }

    #[test]
    fn image_ref_appends_name() {
        let params = LedgerParams::default();
        assert_eq!(
            params.image_ref("Alice"),
            "https://burndawitch.github.io/mai24021/Alice.jpg"
        );
    }
}

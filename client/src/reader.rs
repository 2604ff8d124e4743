//! The state reader — one complete read-only synchronization pass.

use agora_types::{
    Address, AuthorityInfo, ChainId, HistoryEntry, LedgerParams, ProposalStanding, RoundState,
    Snapshot,
};
use agora_ledger::{LedgerError, ProposalLedger, RawHistoryEntry};

/// Parse a numeric field the remote returned as text.
fn parse_u64(field: &'static str, value: &str) -> Result<u64, LedgerError> {
    value.trim().parse().map_err(|_| LedgerError::Parse {
        field,
        value: value.to_string(),
    })
}

/// Votes the caller may still cast, clamped to `0..=max`.
pub(crate) fn remaining_votes(max: u64, cast: u64) -> u64 {
    max.saturating_sub(cast).min(max)
}

/// Execute one pull: read the full contract state for `account` and build a
/// fresh [`Snapshot`].
///
/// Read-only and side-effect free; safe to invoke repeatedly. A chain-id
/// mismatch is reported in `network_ok`, not as an error — the caller still
/// receives everything that was read. Numeric parse failures and co-indexed
/// list divergence are read errors.
pub async fn pull(
    ledger: &dyn ProposalLedger,
    account: &Address,
    superuser: &Address,
    expected_chain: ChainId,
    params: &LedgerParams,
) -> Result<Snapshot, LedgerError> {
    let owner_raw = ledger.owner().await?;
    let owner: Address = owner_raw.parse().map_err(|_| LedgerError::Parse {
        field: "owner",
        value: owner_raw.clone(),
    })?;

    let names = ledger.proposals().await?;
    let votes_raw = ledger.proposal_votes().await?;
    if names.len() != votes_raw.len() {
        return Err(LedgerError::Consistency {
            proposals: names.len(),
            votes: votes_raw.len(),
        });
    }

    let winner_raw = ledger.winner().await?;
    let voting_ended = ledger.voting_ended().await?;
    let cast_raw = ledger.voter_vote_count(account).await?;
    let network_raw = ledger.network_id().await?;

    let proposals = names
        .into_iter()
        .zip(votes_raw)
        .map(|(name, votes)| {
            let votes = parse_u64("proposal vote count", &votes)?;
            let image_ref = params.image_ref(&name);
            Ok(ProposalStanding {
                name,
                votes,
                image_ref,
            })
        })
        .collect::<Result<Vec<_>, LedgerError>>()?;

    let cast = parse_u64("voter vote count", &cast_raw)?;
    let chain = ChainId::new(parse_u64("network id", &network_raw)?);

    Ok(Snapshot {
        account: account.clone(),
        network_ok: chain == expected_chain,
        authority: AuthorityInfo {
            caller_is_authorized: *account == owner || account == superuser,
            owner,
        },
        proposals,
        round: RoundState {
            voting_ended,
            winner: (!winner_raw.is_empty()).then_some(winner_raw),
            remaining_votes: remaining_votes(params.max_votes_per_voter, cast),
        },
    })
}

/// Parse the raw history log and keep the newest `limit` entries, newest
/// first. The full log is re-read on every fetch; nothing is cached.
pub fn parse_history(
    raw: &[RawHistoryEntry],
    limit: usize,
) -> Result<Vec<HistoryEntry>, LedgerError> {
    let newest = raw.len().saturating_sub(limit);
    raw[newest..]
        .iter()
        .rev()
        .map(|entry| {
            Ok(HistoryEntry {
                round: parse_u64("history round", &entry.round)?,
                winner_name: entry.winner_name.clone(),
                vote_count: parse_u64("history vote count", &entry.vote_count)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_nullables::NullLedger;
    use proptest::prelude::*;

    const OWNER: &str = "0x00000000000000000000000000000000000000aa";
    const SUPERUSER: &str = "0x153dfef4355e823dcb0fcc76efe942befca86477";
    const VOTER: &str = "0x00000000000000000000000000000000000000cc";

    fn voter() -> Address {
        Address::new(VOTER)
    }

    fn superuser() -> Address {
        Address::new(SUPERUSER)
    }

    async fn pull_for(ledger: &NullLedger, account: &Address) -> Result<Snapshot, LedgerError> {
        pull(
            ledger,
            account,
            &superuser(),
            ChainId::SEPOLIA,
            &LedgerParams::default(),
        )
        .await
    }

    #[tokio::test]
    async fn zips_proposals_with_vote_counts() {
        let ledger = NullLedger::new(OWNER, &["A", "B"]);
        ledger.set_votes(&[3, 7]);

        let snapshot = pull_for(&ledger, &voter()).await.unwrap();

        assert_eq!(snapshot.proposals.len(), 2);
        assert_eq!(snapshot.proposals[0].name, "A");
        assert_eq!(snapshot.proposals[0].votes, 3);
        assert_eq!(snapshot.proposals[1].name, "B");
        assert_eq!(snapshot.proposals[1].votes, 7);
        assert!(snapshot.proposals[0].image_ref.ends_with("/A.jpg"));
    }

    #[tokio::test]
    async fn length_divergence_is_a_consistency_error() {
        let ledger = NullLedger::new(OWNER, &["A", "B"]);
        ledger.set_votes(&[3, 7]);
        ledger.truncate_votes(1);

        let err = pull_for(&ledger, &voter()).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Consistency {
                proposals: 2,
                votes: 1
            }
        ));
    }

    #[tokio::test]
    async fn owner_is_authorized() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        let snapshot = pull_for(&ledger, &Address::new(OWNER)).await.unwrap();
        assert!(snapshot.authority.caller_is_authorized);
    }

    #[tokio::test]
    async fn superuser_is_authorized_even_when_owner_differs() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        let snapshot = pull_for(&ledger, &superuser()).await.unwrap();
        assert_ne!(snapshot.authority.owner, superuser());
        assert!(snapshot.authority.caller_is_authorized);
    }

    #[tokio::test]
    async fn ordinary_voter_is_not_authorized() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert!(!snapshot.authority.caller_is_authorized);
    }

    #[tokio::test]
    async fn remaining_votes_reach_zero_after_fifth_vote() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        ledger.set_voter_count(&voter(), 5);
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert_eq!(snapshot.round.remaining_votes, 0);
    }

    #[tokio::test]
    async fn remaining_votes_are_identity_scoped() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        ledger.set_voter_count(&voter(), 4);
        let other = Address::new("0x00000000000000000000000000000000000000dd");

        let mine = pull_for(&ledger, &voter()).await.unwrap();
        let theirs = pull_for(&ledger, &other).await.unwrap();
        assert_eq!(mine.round.remaining_votes, 1);
        assert_eq!(theirs.round.remaining_votes, 5);
    }

    #[tokio::test]
    async fn ended_round_is_reflected() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert!(!snapshot.round.voting_ended);

        ledger.set_ended(true);
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert!(snapshot.round.voting_ended);
    }

    #[tokio::test]
    async fn authority_follows_the_current_owner() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert!(!snapshot.authority.caller_is_authorized);

        ledger.set_owner(VOTER);
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert_eq!(snapshot.authority.owner, voter());
        assert!(snapshot.authority.caller_is_authorized);
    }

    #[tokio::test]
    async fn empty_winner_is_none() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert_eq!(snapshot.round.winner, None);

        ledger.set_winner("A");
        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert_eq!(snapshot.round.winner.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn network_mismatch_is_data_not_failure() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        ledger.set_network_id("1");

        let snapshot = pull_for(&ledger, &voter()).await.unwrap();
        assert!(!snapshot.network_ok);
        assert_eq!(snapshot.proposals.len(), 1);
    }

    #[tokio::test]
    async fn unparsable_network_id_is_a_read_error() {
        let ledger = NullLedger::new(OWNER, &["A"]);
        ledger.set_network_id("sepolia");

        let err = pull_for(&ledger, &voter()).await.unwrap_err();
        assert!(matches!(err, LedgerError::Parse { field: "network id", .. }));
    }

    #[tokio::test]
    async fn garbage_owner_address_is_a_read_error() {
        let ledger = NullLedger::new("definitely-not-an-address", &["A"]);
        let err = pull_for(&ledger, &voter()).await.unwrap_err();
        assert!(matches!(err, LedgerError::Parse { field: "owner", .. }));
    }

    #[test]
    fn history_keeps_newest_ten_newest_first() {
        let raw: Vec<_> = (1..=23)
            .map(|round| RawHistoryEntry {
                round: round.to_string(),
                winner_name: format!("winner-{round}"),
                vote_count: "4".to_string(),
            })
            .collect();

        let history = parse_history(&raw, 10).unwrap();
        let rounds: Vec<u64> = history.iter().map(|h| h.round).collect();
        assert_eq!(rounds, vec![23, 22, 21, 20, 19, 18, 17, 16, 15, 14]);
    }

    #[test]
    fn short_history_is_returned_whole() {
        let raw = vec![RawHistoryEntry {
            round: "1".into(),
            winner_name: "Alice".into(),
            vote_count: "9".into(),
        }];
        let history = parse_history(&raw, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].round, 1);
        assert_eq!(history[0].vote_count, 9);
    }

    #[test]
    fn corrupt_history_numeric_is_a_parse_error() {
        let raw = vec![RawHistoryEntry {
            round: "first".into(),
            winner_name: "Alice".into(),
            vote_count: "9".into(),
        }];
        assert!(matches!(
            parse_history(&raw, 10),
            Err(LedgerError::Parse { field: "history round", .. })
        ));
    }

    proptest! {
        /// The remaining-votes derivation is always within [0, max].
        #[test]
        fn remaining_votes_always_in_bounds(cast in 0u64..u64::MAX) {
            let remaining = remaining_votes(5, cast);
            prop_assert!(remaining <= 5);
            if cast >= 5 {
                prop_assert_eq!(remaining, 0);
            } else {
                prop_assert_eq!(remaining, 5 - cast);
            }
        }
    }
}

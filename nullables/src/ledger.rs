//! Nullable remote ledger — an in-memory voting contract for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use agora_types::{Address, Wei};
use agora_ledger::{LedgerError, ProposalLedger, RawHistoryEntry};
use async_trait::async_trait;

/// A deterministic in-memory stand-in for the remote voting contract.
///
/// State only changes through the write surface or the programmatic
/// setters. Read passes are counted (one pass begins with an `owner` read)
/// so tests can assert how many pulls the coordinator issued.
pub struct NullLedger {
    inner: Mutex<State>,
    read_passes: AtomicUsize,
}

struct State {
    owner: String,
    proposals: Vec<String>,
    votes: Vec<u64>,
    winner: String,
    ended: bool,
    voter_counts: HashMap<Address, u64>,
    history: Vec<RawHistoryEntry>,
    network_id: String,
    read_delay: Option<Duration>,
    fail_reads: Option<String>,
    reject_writes: Option<String>,
}

impl NullLedger {
    pub fn new(owner: &str, proposals: &[&str]) -> Self {
        Self {
            inner: Mutex::new(State {
                owner: owner.to_string(),
                proposals: proposals.iter().map(|s| s.to_string()).collect(),
                votes: vec![0; proposals.len()],
                winner: String::new(),
                ended: false,
                voter_counts: HashMap::new(),
                history: Vec::new(),
                network_id: "11155111".to_string(),
                read_delay: None,
                fail_reads: None,
                reject_writes: None,
            }),
            read_passes: AtomicUsize::new(0),
        }
    }

    /// How many read passes have started (one per `owner` read).
    pub fn read_passes(&self) -> usize {
        self.read_passes.load(Ordering::SeqCst)
    }

    /// Delay every `owner` read, holding the pull in flight.
    pub fn set_read_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().read_delay = Some(delay);
    }

    /// Make every read fail with the given message.
    pub fn set_fail_reads(&self, reason: Option<&str>) {
        self.inner.lock().unwrap().fail_reads = reason.map(str::to_string);
    }

    /// Make every write be rejected with the given reason.
    pub fn set_reject_writes(&self, reason: Option<&str>) {
        self.inner.lock().unwrap().reject_writes = reason.map(str::to_string);
    }

    pub fn set_votes(&self, votes: &[u64]) {
        self.inner.lock().unwrap().votes = votes.to_vec();
    }

    /// Force the vote-count list out of step with the proposal list.
    pub fn truncate_votes(&self, len: usize) {
        self.inner.lock().unwrap().votes.truncate(len);
    }

    pub fn set_voter_count(&self, voter: &Address, count: u64) {
        self.inner
            .lock()
            .unwrap()
            .voter_counts
            .insert(voter.clone(), count);
    }

    pub fn set_winner(&self, winner: &str) {
        self.inner.lock().unwrap().winner = winner.to_string();
    }

    pub fn set_ended(&self, ended: bool) {
        self.inner.lock().unwrap().ended = ended;
    }

    pub fn set_network_id(&self, id: &str) {
        self.inner.lock().unwrap().network_id = id.to_string();
    }

    pub fn set_owner(&self, owner: &str) {
        self.inner.lock().unwrap().owner = owner.to_string();
    }

    /// Append completed rounds to the history log.
    pub fn push_history(&self, round: u64, winner_name: &str, vote_count: u64) {
        self.inner.lock().unwrap().history.push(RawHistoryEntry {
            round: round.to_string(),
            winner_name: winner_name.to_string(),
            vote_count: vote_count.to_string(),
        });
    }

    /// Corrupt one history entry so its numeric text no longer parses.
    pub fn corrupt_history_entry(&self, index: usize, round_text: &str) {
        let mut state = self.inner.lock().unwrap();
        if let Some(entry) = state.history.get_mut(index) {
            entry.round = round_text.to_string();
        }
    }

    fn check_read(&self) -> Result<(), LedgerError> {
        if let Some(reason) = &self.inner.lock().unwrap().fail_reads {
            return Err(LedgerError::Rpc(reason.clone()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), LedgerError> {
        if let Some(reason) = &self.inner.lock().unwrap().reject_writes {
            return Err(LedgerError::Rejected(reason.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProposalLedger for NullLedger {
    async fn owner(&self) -> Result<String, LedgerError> {
        self.read_passes.fetch_add(1, Ordering::SeqCst);
        let delay = self.inner.lock().unwrap().read_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_read()?;
        Ok(self.inner.lock().unwrap().owner.clone())
    }

    async fn proposals(&self) -> Result<Vec<String>, LedgerError> {
        self.check_read()?;
        Ok(self.inner.lock().unwrap().proposals.clone())
    }

    async fn proposal_votes(&self) -> Result<Vec<String>, LedgerError> {
        self.check_read()?;
        let state = self.inner.lock().unwrap();
        Ok(state.votes.iter().map(|v| v.to_string()).collect())
    }

    async fn winner(&self) -> Result<String, LedgerError> {
        self.check_read()?;
        Ok(self.inner.lock().unwrap().winner.clone())
    }

    async fn voting_ended(&self) -> Result<bool, LedgerError> {
        self.check_read()?;
        Ok(self.inner.lock().unwrap().ended)
    }

    async fn voter_vote_count(&self, voter: &Address) -> Result<String, LedgerError> {
        self.check_read()?;
        let state = self.inner.lock().unwrap();
        Ok(state
            .voter_counts
            .get(voter)
            .copied()
            .unwrap_or(0)
            .to_string())
    }

    async fn network_id(&self) -> Result<String, LedgerError> {
        self.check_read()?;
        Ok(self.inner.lock().unwrap().network_id.clone())
    }

    async fn voting_history(&self) -> Result<Vec<RawHistoryEntry>, LedgerError> {
        self.check_read()?;
        Ok(self.inner.lock().unwrap().history.clone())
    }

    async fn vote(&self, from: &Address, index: usize, _stake: Wei) -> Result<(), LedgerError> {
        self.check_write()?;
        let mut state = self.inner.lock().unwrap();
        if state.ended {
            return Err(LedgerError::Rejected("voting has ended".into()));
        }
        match state.votes.get_mut(index) {
            Some(count) => *count += 1,
            None => return Err(LedgerError::Rejected(format!("no proposal at index {index}"))),
        }
        *state.voter_counts.entry(from.clone()).or_insert(0) += 1;
        Ok(())
    }

    async fn end_voting(&self, _from: &Address) -> Result<(), LedgerError> {
        self.check_write()?;
        self.inner.lock().unwrap().ended = true;
        Ok(())
    }

    async fn declare_winner(&self, _from: &Address) -> Result<(), LedgerError> {
        self.check_write()?;
        let mut state = self.inner.lock().unwrap();
        let best = state
            .votes
            .iter()
            .enumerate()
            .max_by_key(|(_, v)| **v)
            .map(|(i, _)| i);
        if let Some(i) = best {
            state.winner = state.proposals[i].clone();
        }
        Ok(())
    }

    async fn reset_voting(&self, _from: &Address) -> Result<(), LedgerError> {
        self.check_write()?;
        let mut state = self.inner.lock().unwrap();
        let len = state.proposals.len();
        state.votes = vec![0; len];
        state.winner.clear();
        state.ended = false;
        state.voter_counts.clear();
        Ok(())
    }

    async fn withdraw(&self, _from: &Address) -> Result<(), LedgerError> {
        self.check_write()
    }

    async fn transfer_ownership(
        &self,
        _from: &Address,
        new_owner: &Address,
    ) -> Result<(), LedgerError> {
        self.check_write()?;
        self.inner.lock().unwrap().owner = new_owner.as_str().to_string();
        Ok(())
    }

    async fn destroy(&self, _from: &Address) -> Result<(), LedgerError> {
        self.check_write()
    }
}

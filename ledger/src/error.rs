use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transport or remote failure during a read-only query.
    #[error("ledger RPC error: {0}")]
    Rpc(String),

    /// A numeric field the remote returned as text did not parse.
    #[error("failed to parse {field}: {value:?}")]
    Parse { field: &'static str, value: String },

    /// The co-indexed proposal and vote-count lists diverged in length.
    #[error("remote consistency error: {proposals} proposals but {votes} vote counts")]
    Consistency { proposals: usize, votes: usize },

    /// The remote rejected a state-changing request.
    #[error("rejected by remote ledger: {0}")]
    Rejected(String),

    /// The event subscription channel failed.
    #[error("event subscription error: {0}")]
    Subscription(String),
}

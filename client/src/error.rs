use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("wallet error: {0}")]
    Wallet(#[from] agora_wallet::WalletError),

    #[error("ledger error: {0}")]
    Ledger(#[from] agora_ledger::LedgerError),

    #[error("{operation} blocked: {reason}")]
    Precondition {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("no connected wallet account")]
    NotConnected,

    #[error("config error: {0}")]
    Config(String),
}

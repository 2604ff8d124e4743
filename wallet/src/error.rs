use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    /// No wallet integration is reachable at all.
    #[error("no wallet integration available")]
    Unavailable,

    #[error("wallet provider error: {0}")]
    Provider(String),

    #[error("wallet returned an invalid address: {0}")]
    InvalidAddress(String),

    #[error("wallet returned an invalid chain id: {0}")]
    InvalidChainId(String),
}

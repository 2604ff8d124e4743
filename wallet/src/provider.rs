//! The wallet provider trait.

use agora_types::{Address, ChainId};
use async_trait::async_trait;

use crate::error::WalletError;

/// Read-only access to the local wallet integration.
///
/// Implementations must not mutate any client state; the identity monitor is
/// the only caller and reacts purely to what these methods return.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the wallet currently exposes, primary account first.
    ///
    /// An empty list means the wallet is present but not connected.
    /// [`WalletError::Unavailable`] means there is no wallet integration
    /// at all — a distinct, persistently surfaced condition.
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// The chain the wallet is currently pointed at.
    async fn chain_id(&self) -> Result<ChainId, WalletError>;
}

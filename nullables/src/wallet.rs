//! Nullable wallet provider — programmable identity for testing.

use std::sync::Mutex;

use agora_types::{Address, ChainId, WalletStatus};
use agora_wallet::{WalletError, WalletProvider};
use async_trait::async_trait;

/// A deterministic wallet provider.
///
/// The exposed status only changes when you tell it to.
pub struct NullWallet {
    inner: Mutex<State>,
}

struct State {
    status: WalletStatus,
    chain: ChainId,
    fail_reads: bool,
}

impl NullWallet {
    pub fn new(status: WalletStatus) -> Self {
        Self {
            inner: Mutex::new(State {
                status,
                chain: ChainId::SEPOLIA,
                fail_reads: false,
            }),
        }
    }

    /// A wallet connected as the given account.
    pub fn connected(address: Address) -> Self {
        Self::new(WalletStatus::Connected(address))
    }

    /// Change what the wallet exposes (simulates account switching,
    /// disconnecting, or the integration disappearing).
    pub fn set_status(&self, status: WalletStatus) {
        self.inner.lock().unwrap().status = status;
    }

    pub fn set_chain(&self, chain: ChainId) {
        self.inner.lock().unwrap().chain = chain;
    }

    /// Make subsequent reads fail with a transient provider error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_reads = fail;
    }
}

#[async_trait]
impl WalletProvider for NullWallet {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        let state = self.inner.lock().unwrap();
        if state.fail_reads {
            return Err(WalletError::Provider("null wallet read failure".into()));
        }
        match &state.status {
            WalletStatus::Unavailable => Err(WalletError::Unavailable),
            WalletStatus::NotConnected => Ok(Vec::new()),
            WalletStatus::Connected(addr) => Ok(vec![addr.clone()]),
        }
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        let state = self.inner.lock().unwrap();
        if state.fail_reads {
            return Err(WalletError::Provider("null wallet read failure".into()));
        }
        Ok(state.chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chain_follows_the_setter() {
        let wallet = NullWallet::new(WalletStatus::NotConnected);
        assert_eq!(wallet.chain_id().await.unwrap(), ChainId::SEPOLIA);

        wallet.set_chain(ChainId::new(1));
        assert_eq!(wallet.chain_id().await.unwrap(), ChainId::new(1));
    }

    #[tokio::test]
    async fn failing_reads_affect_both_surfaces() {
        let addr = Address::new("0x00000000000000000000000000000000000000aa");
        let wallet = NullWallet::connected(addr);
        wallet.set_fail_reads(true);
        assert!(wallet.accounts().await.is_err());
        assert!(wallet.chain_id().await.is_err());
    }
}

//! Wallet provider seam for the agora client.
//!
//! The wallet is the source of the caller identity: which account (if any)
//! is active, and which chain the wallet is pointed at. The identity monitor
//! polls this seam; everything else in the client treats the result as data.

pub mod error;
pub mod provider;
pub mod rpc;

pub use error::WalletError;
pub use provider::WalletProvider;
pub use rpc::RpcWallet;

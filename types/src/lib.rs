//! Fundamental types for the agora voting client.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, chain identifiers, currency amounts, ledger
//! parameters, and the snapshot data model the sync engine maintains.

pub mod address;
pub mod amount;
pub mod identity;
pub mod network;
pub mod params;
pub mod snapshot;

pub use address::{Address, AddressParseError};
pub use amount::Wei;
pub use identity::WalletStatus;
pub use network::ChainId;
pub use params::LedgerParams;
pub use snapshot::{AuthorityInfo, HistoryEntry, ProposalStanding, RoundState, Snapshot};

//! Nullable infrastructure for deterministic testing.
//!
//! The client's external dependencies (wallet provider, remote ledger,
//! event stream) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod events;
pub mod ledger;
pub mod wallet;

pub use events::{NullEventPublisher, NullEventStream};
pub use ledger::NullLedger;
pub use wallet::NullWallet;

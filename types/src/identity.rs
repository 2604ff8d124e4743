//! The active local identity presented to the remote ledger.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the wallet integration currently exposes.
///
/// A missing wallet integration and a present-but-disconnected wallet are
/// distinct states; the client surfaces different guidance for each.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletStatus {
    /// No wallet integration is reachable at all.
    Unavailable,
    /// The integration is present but exposes no account.
    NotConnected,
    /// An account is connected and usable as the caller identity.
    Connected(Address),
}

impl WalletStatus {
    /// The connected account, if any.
    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::Connected(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "wallet unavailable"),
            Self::NotConnected => write!(f, "wallet not connected"),
            Self::Connected(addr) => write!(f, "connected as {addr}"),
        }
    }
}

//! EVM-style account address with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a well-formed address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("address must be 40 hex characters after the prefix, got {0}")]
    BadLength(usize),

    #[error("address contains a non-hex character: {0}")]
    NonHex(char),
}

/// A 20-byte account address, hex-encoded with a `0x` prefix.
///
/// Addresses are normalized to lowercase on construction so that identity
/// comparisons (caller vs. contract owner, caller vs. superuser override)
/// are case-insensitive regardless of how the remote side checksums them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "0x";

    /// Hex digits expected after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Create an address from a known-good literal.
    ///
    /// # Panics
    /// Panics if the string is not a valid address. Use [`Address::from_str`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        s.parse().expect("address literal must be well-formed")
    }

    /// Return the raw (lowercased) address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| AddressParseError::MissingPrefix(s.to_string()))?;
        if hex.len() != Self::HEX_LEN {
            return Err(AddressParseError::BadLength(hex.len()));
        }
        if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(AddressParseError::NonHex(bad));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_to_lowercase() {
        let mixed = "0x153dfef4355E823dCB0FCc76Efe942BefCa86477";
        let addr: Address = mixed.parse().unwrap();
        assert_eq!(addr.as_str(), "0x153dfef4355e823dcb0fcc76efe942befca86477");
    }

    #[test]
    fn case_variants_compare_equal() {
        let a: Address = "0x153dfef4355E823dCB0FCc76Efe942BefCa86477".parse().unwrap();
        let b: Address = "0x153DFEF4355E823DCB0FCC76EFE942BEFCA86477".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_missing_prefix() {
        let err = "153dfef4355e823dcb0fcc76efe942befca86477"
            .parse::<Address>()
            .unwrap_err();
        assert!(matches!(err, AddressParseError::MissingPrefix(_)));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = "0x1234".parse::<Address>().unwrap_err();
        assert_eq!(err, AddressParseError::BadLength(4));
    }

    #[test]
    fn rejects_non_hex() {
        let err = "0xzz3dfef4355e823dcb0fcc76efe942befca86477"
            .parse::<Address>()
            .unwrap_err();
        assert_eq!(err, AddressParseError::NonHex('z'));
    }

    #[test]
    fn serde_round_trip_keeps_normalization() {
        let addr = Address::new("0x153dfef4355E823dCB0FCc76Efe942BefCa86477");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x153dfef4355e823dcb0fcc76efe942befca86477\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn serde_rejects_invalid_address() {
        let result: Result<Address, _> = serde_json::from_str("\"not-an-address\"");
        assert!(result.is_err());
    }
}

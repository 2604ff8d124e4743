//! Ledger-native currency amounts.
//!
//! Amounts are raw wei (u128) internally to avoid floating-point errors, and
//! cross every serialized boundary as a decimal string: neither TOML nor
//! JSON can carry a 128-bit integer.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wei in one ether.
const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// An amount of the ledger-native currency, in wei.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wei(u128);

impl Wei {
    pub const ZERO: Self = Self(0);

    /// The fixed stake attached to every vote: 0.01 ether.
    pub const VOTE_STAKE: Self = Self(WEI_PER_ETHER / 100);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Serialize for Wei {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Wei {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u128>()
            .map(Self)
            .map_err(|_| D::Error::custom(format!("invalid wei amount: {raw:?}")))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / WEI_PER_ETHER;
        let frac = self.0 % WEI_PER_ETHER;
        if frac == 0 {
            return write!(f, "{whole} ETH");
        }
        let frac = format!("{frac:018}");
        write!(f, "{}.{} ETH", whole, frac.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_stake_is_one_hundredth_ether() {
        assert_eq!(Wei::VOTE_STAKE.raw(), 10_000_000_000_000_000);
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Wei::VOTE_STAKE.to_string(), "0.01 ETH");
        assert_eq!(Wei::new(WEI_PER_ETHER).to_string(), "1 ETH");
        assert_eq!(Wei::ZERO.to_string(), "0 ETH");
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(Wei::new(5).saturating_sub(Wei::new(9)), Wei::ZERO);
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let json = serde_json::to_string(&Wei::VOTE_STAKE).unwrap();
        assert_eq!(json, "\"10000000000000000\"");
        let back: Wei = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Wei::VOTE_STAKE);
    }

    #[test]
    fn serde_round_trips_amounts_beyond_u64() {
        let big = Wei::new(u128::from(u64::MAX) + 1);
        let json = serde_json::to_string(&big).unwrap();
        let back: Wei = serde_json::from_str(&json).unwrap();
        assert_eq!(back, big);
    }

    #[test]
    fn serde_rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Wei>("\"a lot\"").is_err());
        assert!(serde_json::from_str::<Wei>("\"-5\"").is_err());
    }
}

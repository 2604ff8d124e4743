use proptest::prelude::*;

use agora_types::{Address, ChainId, Wei};

fn hex_addr() -> impl Strategy<Value = String> {
    "[0-9a-f]{40}".prop_map(|hex| format!("0x{hex}"))
}

proptest! {
    /// Parsing a valid lowercase address is lossless.
    #[test]
    fn address_parse_roundtrip(raw in hex_addr()) {
        let addr: Address = raw.parse().unwrap();
        prop_assert_eq!(addr.as_str(), raw.as_str());
    }

    /// Uppercasing the hex digits never changes identity.
    #[test]
    fn address_comparison_is_case_insensitive(raw in hex_addr()) {
        let lower: Address = raw.parse().unwrap();
        let upper: Address = raw.to_ascii_uppercase().replace("0X", "0x").parse().unwrap();
        prop_assert_eq!(lower, upper);
    }

    /// Wei saturating subtraction never underflows.
    #[test]
    fn wei_saturating_sub_never_underflows(a in 0u128..u128::MAX, b in 0u128..u128::MAX) {
        let diff = Wei::new(a).saturating_sub(Wei::new(b));
        prop_assert_eq!(diff.raw(), a.saturating_sub(b));
    }

    /// Wei ordering agrees with raw ordering.
    #[test]
    fn wei_ordering(a in 0u128..u128::MAX, b in 0u128..u128::MAX) {
        prop_assert_eq!(Wei::new(a) <= Wei::new(b), a <= b);
    }

    /// ChainId round-trips through u64.
    #[test]
    fn chain_id_roundtrip(id in 0u64..u64::MAX) {
        prop_assert_eq!(ChainId::new(id).as_u64(), id);
    }
}

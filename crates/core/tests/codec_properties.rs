//! Property tests for the wire codec.

use governor_core::codec::{decode_int, encode_int};
use governor_core::{icx_to_loop, loop_to_str, BigInt};
use proptest::prelude::*;

proptest! {
    #[test]
    fn hex_int_round_trips(value in any::<i128>()) {
        let value = BigInt::from(value);
        let encoded = encode_int(&value);
        prop_assert!(encoded.starts_with("0x") || encoded.starts_with("-0x"));
        prop_assert_eq!(decode_int(&encoded).unwrap(), value);
    }

    #[test]
    fn unprefixed_digits_never_decode(value in any::<u64>()) {
        let digits = format!("{:x}", value);
        prop_assert!(decode_int(&digits).is_err());
    }

    #[test]
    fn icx_rendering_parses_back(value in any::<u128>()) {
        let value = BigInt::from(value);
        prop_assert_eq!(icx_to_loop(&loop_to_str(&value)).unwrap(), value);
    }
}

//! Hex codec for values crossing the JSON-RPC boundary.
//!
//! Integers travel as `0x`-prefixed lower-case hex (`-0x` for negative
//! values), booleans as `0x0`/`0x1`, byte strings as `0x`-prefixed hex.
//! A value without the prefix is rejected rather than guessed at.

use crate::error::{CoreError, Result};
use num_bigint::{BigInt, BigUint, Sign};

/// Encodes an integer as `0x..` / `-0x..`.
pub fn encode_int(value: &BigInt) -> String {
    match value.sign() {
        Sign::Minus => format!("-0x{:x}", value.magnitude()),
        Sign::NoSign | Sign::Plus => format!("0x{:x}", value.magnitude()),
    }
}

/// Decodes a `0x`/`-0x` prefixed integer.
pub fn decode_int(text: &str) -> Result<BigInt> {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, text),
    };
    let digits = unsigned
        .strip_prefix("0x")
        .ok_or_else(|| CoreError::MissingHexPrefix(text.to_string()))?;

    // BigUint parsing tolerates '_' and '+', the wire format does not.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidHex(text.to_string()));
    }

    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| CoreError::InvalidHex(text.to_string()))?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Encodes a boolean as `0x1` / `0x0`.
pub fn encode_bool(value: bool) -> String {
    if value { "0x1" } else { "0x0" }.to_string()
}

pub fn decode_bool(text: &str) -> Result<bool> {
    match text {
        "0x1" => Ok(true),
        "0x0" => Ok(false),
        other => Err(CoreError::InvalidBool(other.to_string())),
    }
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn decode_bytes(text: &str) -> Result<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| CoreError::MissingHexPrefix(text.to_string()))?;
    hex::decode(digits).map_err(|_| CoreError::InvalidHex(text.to_string()))
}

//! ICX and loop conversion.

use crate::error::{CoreError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// Number of loop in one ICX.
pub const LOOP_PER_ICX: u64 = 1_000_000_000_000_000_000;

const ICX_DECIMALS: usize = 18;

/// Renders a loop amount as an exact decimal ICX string.
///
/// `1` renders as `0.000000000000000001`, `1.5 * 10^18` as `1.5`.
pub fn loop_to_str(value: &BigInt) -> String {
    let sign = if value.is_negative() { "-" } else { "" };
    let (integer, fraction) = value.abs().div_rem(&BigInt::from(LOOP_PER_ICX));

    if fraction.is_zero() {
        return format!("{sign}{integer}");
    }

    let digits = fraction.to_string();
    let padded = format!("{}{}", "0".repeat(ICX_DECIMALS - digits.len()), digits);
    format!("{sign}{integer}.{}", padded.trim_end_matches('0'))
}

/// Parses a decimal ICX amount into loop.
pub fn icx_to_loop(text: &str) -> Result<BigInt> {
    let invalid = || CoreError::InvalidAmount(text.to_string());

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > ICX_DECIMALS
        || !integer.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let digits = format!(
        "{}{}{}",
        if integer.is_empty() { "0" } else { integer },
        fraction,
        "0".repeat(ICX_DECIMALS - fraction.len())
    );
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
    Ok(if negative { -magnitude } else { magnitude })
}

//! Error types for core primitives.

use thiserror::Error;

/// Errors raised while parsing or decoding wire values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The text is not a valid `hx`/`cx` address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A numeric field arrived without its `0x` prefix.
    #[error("Missing 0x prefix: {0}")]
    MissingHexPrefix(String),

    /// The digits after the prefix are not hex.
    #[error("Invalid hex value: {0}")]
    InvalidHex(String),

    /// A boolean field was neither `0x0` nor `0x1`.
    #[error("Invalid boolean value: {0}")]
    InvalidBool(String),

    /// A decimal ICX amount could not be parsed.
    #[error("Invalid ICX amount: {0}")]
    InvalidAmount(String),

    /// A result field did not have the shape its schema expects.
    #[error("Field '{field}': expected {expected}")]
    UnexpectedShape {
        /// Field name (dotted for nested fields).
        field: String,
        /// Human readable description of the expected shape.
        expected: &'static str,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

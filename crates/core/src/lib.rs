//! Governor Core Library
//!
//! This crate provides the primitives shared by the governor client:
//! - ICON addresses (`hx` accounts and `cx` contracts)
//! - The hex codec used for every numeric value on the wire
//! - ICX/loop unit conversion
//! - Result schemas and the decoder that turns raw JSON-RPC results into
//!   typed records for display

pub mod address;
pub mod codec;
pub mod error;
pub mod record;
pub mod schema;
pub mod units;

pub use address::{
    Address, AddressPrefix, GOVERNANCE_SCORE_ADDRESS, SYSTEM_SCORE_ADDRESS, ZERO_ADDRESS,
};
pub use error::{CoreError, Result};
pub use record::{decode_record, decode_value, ResultRecord, Value};
pub use schema::{FieldType, Schema};
pub use units::{icx_to_loop, loop_to_str, LOOP_PER_ICX};

/// Re-exported so downstream crates agree on the integer type.
pub use num_bigint::BigInt;

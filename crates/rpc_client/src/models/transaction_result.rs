// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// transaction_result.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{RpcError, RpcResult};
use governor_core::codec::{decode_bytes, decode_int};
use governor_core::schema::TX_RESULT;
use governor_core::{decode_record, Address, BigInt, ResultRecord};
use num_traits::One;
use serde_json::Value;

/// Outcome of an executed transaction, from `icx_getTransactionResult`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResult {
    pub success: bool,
    pub tx_hash: Vec<u8>,
    pub block_height: Option<BigInt>,
    pub step_used: Option<BigInt>,
    pub score_address: Option<Address>,
    pub failure: Option<TransactionFailure>,
    /// The result object as received.
    pub raw: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFailure {
    pub code: BigInt,
    pub message: String,
}

impl TransactionResult {
    pub fn from_json(raw: Value) -> RpcResult<Self> {
        let object = raw
            .as_object()
            .ok_or_else(|| RpcError::invalid_response("transaction result is not an object"))?;

        let text = |name: &str| object.get(name).and_then(Value::as_str);
        let int = |name: &str| text(name).map(decode_int).transpose();

        let status = int("status")?
            .ok_or_else(|| RpcError::invalid_response("transaction result has no status"))?;
        let tx_hash = match text("txHash") {
            Some(hash) => decode_bytes(hash)?,
            None => Vec::new(),
        };
        let score_address = text("scoreAddress").map(str::parse::<Address>).transpose()?;

        let failure = match object.get("failure") {
            Some(failure) => Some(TransactionFailure {
                code: failure
                    .get("code")
                    .and_then(Value::as_str)
                    .map(decode_int)
                    .transpose()?
                    .unwrap_or_default(),
                message: failure
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }),
            None => None,
        };

        Ok(Self {
            success: status.is_one(),
            tx_hash,
            block_height: int("blockHeight")?,
            step_used: int("stepUsed")?,
            score_address,
            failure,
            raw,
        })
    }

    /// Decodes the whole result for display.
    pub fn record(&self) -> RpcResult<ResultRecord> {
        Ok(decode_record(&TX_RESULT, &self.raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_failed_result() {
        let result = TransactionResult::from_json(json!({
            "status": "0x0",
            "txHash": "0xabcd",
            "blockHeight": "0x10",
            "stepUsed": "0x186a0",
            "failure": {"code": "0x7d64", "message": "Out of step"}
        }))
        .unwrap();

        assert!(!result.success);
        assert_eq!(result.tx_hash, vec![0xab, 0xcd]);
        assert_eq!(result.block_height, Some(BigInt::from(16)));
        assert_eq!(
            result.failure,
            Some(TransactionFailure {
                code: BigInt::from(0x7d64),
                message: "Out of step".to_string(),
            })
        );
    }

    #[test]
    fn status_is_required() {
        assert!(TransactionResult::from_json(json!({"txHash": "0x00"})).is_err());
    }
}

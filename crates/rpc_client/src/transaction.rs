// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// transaction.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::builder::{CallParams, DeployContent};
use crate::error::{RpcError, RpcResult};
use crate::serializer::tx_hash;
use base64::{engine::general_purpose, Engine as _};
use governor_core::codec::encode_int;
use governor_core::{Address, BigInt};
use governor_wallets::TransactionSigner;
use serde_json::{json, Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Transaction format version.
pub const TRANSACTION_VERSION: u64 = 3;

/// Payload of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionData {
    /// Invokes a SCORE method.
    Call {
        method: String,
        params: Option<CallParams>,
    },
    /// Installs or updates SCORE code.
    Deploy {
        content: DeployContent,
        params: Option<CallParams>,
    },
}

impl TransactionData {
    pub fn data_type(&self) -> &'static str {
        match self {
            TransactionData::Call { .. } => "call",
            TransactionData::Deploy { .. } => "deploy",
        }
    }

    pub fn to_json(&self) -> Value {
        let mut data = Map::new();
        let params = match self {
            TransactionData::Call { method, params } => {
                data.insert("method".to_string(), json!(method));
                params
            }
            TransactionData::Deploy { content, params } => {
                data.insert("contentType".to_string(), json!(content.content_type));
                data.insert("content".to_string(), json!(content.to_hex()));
                params
            }
        };
        if let Some(params) = params.as_ref().filter(|params| !params.is_empty()) {
            data.insert("params".to_string(), params.to_json());
        }
        Value::Object(data)
    }
}

/// What to send and where, before sender, network and step limit are known.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub to: Address,
    pub value: Option<BigInt>,
    pub data: TransactionData,
}

impl TransactionRequest {
    /// Completes the request into a transaction stamped with the current
    /// time.
    pub fn into_transaction(
        self,
        from: Address,
        nid: BigInt,
        step_limit: Option<BigInt>,
    ) -> Transaction {
        Transaction {
            version: BigInt::from(TRANSACTION_VERSION),
            from,
            to: self.to,
            value: self.value,
            step_limit,
            timestamp: now_micros(),
            nid,
            nonce: None,
            data: self.data,
        }
    }
}

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or_default()
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub version: BigInt,
    pub from: Address,
    pub to: Address,
    pub value: Option<BigInt>,
    /// Absent when the transaction is only estimated.
    pub step_limit: Option<BigInt>,
    /// Microseconds since the Unix epoch.
    pub timestamp: u64,
    pub nid: BigInt,
    pub nonce: Option<BigInt>,
    pub data: TransactionData,
}

impl Transaction {
    /// Transaction params as sent over the wire.
    pub fn to_json(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("version".to_string(), json!(encode_int(&self.version)));
        params.insert("from".to_string(), json!(self.from.to_string()));
        params.insert("to".to_string(), json!(self.to.to_string()));
        if let Some(value) = &self.value {
            params.insert("value".to_string(), json!(encode_int(value)));
        }
        if let Some(step_limit) = &self.step_limit {
            params.insert("stepLimit".to_string(), json!(encode_int(step_limit)));
        }
        params.insert(
            "timestamp".to_string(),
            json!(encode_int(&BigInt::from(self.timestamp))),
        );
        params.insert("nid".to_string(), json!(encode_int(&self.nid)));
        if let Some(nonce) = &self.nonce {
            params.insert("nonce".to_string(), json!(encode_int(nonce)));
        }
        params.insert("dataType".to_string(), json!(self.data.data_type()));
        params.insert("data".to_string(), self.data.to_json());
        params
    }

    pub fn hash(&self) -> [u8; 32] {
        tx_hash(&self.to_json())
    }

    /// Signs the transaction hash with `signer`, which must own `from`.
    pub fn sign(self, signer: &dyn TransactionSigner) -> RpcResult<SignedTransaction> {
        if signer.address() != self.from {
            return Err(RpcError::invalid_params(format!(
                "signer {} cannot sign for {}",
                signer.address(),
                self.from
            )));
        }

        let hash = self.hash();
        let signature = signer.sign(&hash)?;
        Ok(SignedTransaction {
            transaction: self,
            hash,
            signature: general_purpose::STANDARD.encode(signature),
        })
    }
}

/// A transaction with its base64 signature attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub hash: [u8; 32],
    pub signature: String,
}

impl SignedTransaction {
    pub fn to_json(&self) -> Map<String, Value> {
        let mut params = self.transaction.to_json();
        params.insert("signature".to_string(), json!(self.signature));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governor_core::GOVERNANCE_SCORE_ADDRESS;
    use governor_wallets::KeyWallet;

    fn request() -> TransactionRequest {
        TransactionRequest {
            to: GOVERNANCE_SCORE_ADDRESS,
            value: None,
            data: TransactionData::Call {
                method: "setStepPrice".to_string(),
                params: Some(CallParams::new().with_int("stepPrice", &BigInt::from(12_500_000_000u64))),
            },
        }
    }

    #[test]
    fn json_layout() {
        let wallet = KeyWallet::from_private_key(&[5u8; 32]).unwrap();
        let mut tx = request().into_transaction(wallet.address(), BigInt::from(3), None);
        tx.timestamp = 0x563a6cf330136;

        let json = Value::Object(tx.to_json());
        assert_eq!(json["version"], "0x3");
        assert_eq!(json["nid"], "0x3");
        assert_eq!(json["timestamp"], "0x563a6cf330136");
        assert_eq!(json["dataType"], "call");
        assert_eq!(json["data"]["params"]["stepPrice"], "0x2e90edd00");
        assert!(json.get("stepLimit").is_none());
    }

    #[test]
    fn signature_matches_hash() {
        let wallet = KeyWallet::from_private_key(&[5u8; 32]).unwrap();
        let tx = request().into_transaction(
            wallet.address(),
            BigInt::from(1),
            Some(BigInt::from(100_000)),
        );
        let hash = tx.hash();

        let signed = tx.sign(&wallet).unwrap();
        let expected = general_purpose::STANDARD.encode(wallet.sign_recoverable(&hash));
        assert_eq!(signed.hash, hash);
        assert_eq!(signed.signature, expected);
        assert_eq!(signed.to_json()["signature"], json!(expected));
    }

    #[test]
    fn foreign_signer_is_rejected() {
        let owner = KeyWallet::from_private_key(&[5u8; 32]).unwrap();
        let other = KeyWallet::from_private_key(&[6u8; 32]).unwrap();
        let tx = request().into_transaction(owner.address(), BigInt::from(1), None);
        assert!(matches!(
            tx.sign(&other),
            Err(RpcError::InvalidParams { .. })
        ));
    }
}

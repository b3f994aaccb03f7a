// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// provider.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::builder::Call;
use crate::error::RpcResult;
use crate::models::TransactionResult;
use crate::transaction::{SignedTransaction, Transaction};
use async_trait::async_trait;
use governor_core::{Address, BigInt};
use serde_json::Value;

/// The node operations the SCORE APIs and the invoker rely on.
#[async_trait]
pub trait IconProvider: Send + Sync {
    /// `icx_call`: runs a read-only SCORE method and returns its raw result.
    async fn call(&self, call: &Call) -> RpcResult<Value>;

    /// `icx_sendTransaction`: submits a signed transaction, returning its hash.
    async fn send_transaction(&self, transaction: &SignedTransaction) -> RpcResult<[u8; 32]>;

    /// `debug_estimateStep`: the steps a transaction without `stepLimit`
    /// would consume.
    async fn estimate_step(&self, transaction: &Transaction) -> RpcResult<BigInt>;

    /// `icx_getTransactionResult`
    async fn get_transaction_result(&self, tx_hash: &[u8; 32]) -> RpcResult<TransactionResult>;

    /// `icx_getScoreApi`
    async fn get_score_api(&self, address: &Address) -> RpcResult<Value>;
}

// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// invoker.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! The write path: estimate, or confirm, sign and submit.

use crate::error::{RpcError, RpcResult};
use crate::provider::IconProvider;
use crate::transaction::{Transaction, TransactionRequest};
use governor_core::codec::{encode_bytes, encode_int};
use governor_core::BigInt;
use governor_wallets::TransactionSigner;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Step limit used when none is configured.
pub const DEFAULT_STEP_LIMIT: u64 = 100_000_000;

/// Gate asked before a transaction is signed.
pub trait Confirmation: Send + Sync {
    /// Returns `false` to abort the transaction.
    fn confirm(&self, transaction: &Transaction) -> std::io::Result<bool>;
}

/// Approves every transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirmation for AutoConfirm {
    fn confirm(&self, _transaction: &Transaction) -> std::io::Result<bool> {
        Ok(true)
    }
}

/// Result of [`Invoker::invoke`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// Steps the transaction would consume.
    Estimated(BigInt),
    /// Hash of the submitted transaction.
    TxHash([u8; 32]),
}

impl fmt::Display for InvokeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeOutcome::Estimated(steps) => {
                write!(f, "estimated step: {steps} ({})", encode_int(steps))
            }
            InvokeOutcome::TxHash(hash) => write!(f, "txHash: {}", encode_bytes(hash)),
        }
    }
}

/// Sends transactions on behalf of one signer.
pub struct Invoker {
    provider: Arc<dyn IconProvider>,
    signer: Arc<dyn TransactionSigner>,
    confirmation: Box<dyn Confirmation>,
    nid: BigInt,
    step_limit: BigInt,
    estimate: bool,
}

impl Invoker {
    pub fn new(
        provider: Arc<dyn IconProvider>,
        signer: Arc<dyn TransactionSigner>,
        nid: BigInt,
        confirmation: Box<dyn Confirmation>,
    ) -> Self {
        Self {
            provider,
            signer,
            confirmation,
            nid,
            step_limit: BigInt::from(DEFAULT_STEP_LIMIT),
            estimate: false,
        }
    }

    pub fn with_step_limit(mut self, step_limit: BigInt) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Estimate steps instead of submitting.
    pub fn with_estimate(mut self, estimate: bool) -> Self {
        self.estimate = estimate;
        self
    }

    /// Estimates or submits the transaction described by `request`.
    pub async fn invoke(&self, request: impl Into<TransactionRequest>) -> RpcResult<InvokeOutcome> {
        let request = request.into();
        let from = self.signer.address();

        if self.estimate {
            let transaction = request.into_transaction(from, self.nid.clone(), None);
            debug!(to = %transaction.to, "estimating transaction");
            let steps = self.provider.estimate_step(&transaction).await?;
            return Ok(InvokeOutcome::Estimated(steps));
        }

        let transaction =
            request.into_transaction(from, self.nid.clone(), Some(self.step_limit.clone()));
        if !self.confirmation.confirm(&transaction)? {
            return Err(RpcError::Cancelled);
        }

        let signed = transaction.sign(self.signer.as_ref())?;
        let hash = self.provider.send_transaction(&signed).await?;
        info!(from = %from, tx_hash = %encode_bytes(&hash), "transaction sent");
        Ok(InvokeOutcome::TxHash(hash))
    }
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("from", &self.signer.address())
            .field("nid", &self.nid)
            .field("step_limit", &self.step_limit)
            .field("estimate", &self.estimate)
            .finish_non_exhaustive()
    }
}

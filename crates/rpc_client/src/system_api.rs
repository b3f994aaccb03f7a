// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// system_api.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::builder::{CallBuilder, CallParams, CallTransactionBuilder};
use crate::error::{RpcError, RpcResult};
use crate::provider::IconProvider;
use governor_core::{Address, BigInt, SYSTEM_SCORE_ADDRESS};
use num_traits::{Signed, Zero};
use serde_json::Value;
use std::sync::Arc;

/// Method names of the System SCORE.
pub mod methods {
    pub const GET_STAKE: &str = "getStake";
    pub const SET_STAKE: &str = "setStake";
    pub const GET_PREP: &str = "getPRep";
    pub const GET_PREPS: &str = "getPReps";
    pub const GET_MAIN_PREPS: &str = "getMainPReps";
    pub const GET_SUB_PREPS: &str = "getSubPReps";
    pub const GET_PREP_STATS: &str = "getPRepStats";
    pub const GET_DELEGATION: &str = "getDelegation";
    pub const QUERY_ISCORE: &str = "queryIScore";
    pub const CLAIM_ISCORE: &str = "claimIScore";
}

/// Staking, delegation, P-Rep and I-Score access through the System SCORE.
pub struct SystemApi {
    provider: Arc<dyn IconProvider>,
}

impl SystemApi {
    pub fn new(provider: Arc<dyn IconProvider>) -> Self {
        Self { provider }
    }

    async fn query(&self, method: &str, params: Option<CallParams>) -> RpcResult<Value> {
        let mut builder = CallBuilder::new().to(SYSTEM_SCORE_ADDRESS).method(method);
        if let Some(params) = params {
            builder = builder.params(params);
        }
        self.provider.call(&builder.build()?).await
    }

    async fn query_address(&self, method: &str, address: &Address) -> RpcResult<Value> {
        let params = CallParams::new().with_address("address", address);
        self.query(method, Some(params)).await
    }

    pub async fn get_stake(&self, address: &Address) -> RpcResult<Value> {
        self.query_address(methods::GET_STAKE, address).await
    }

    pub async fn get_prep(&self, address: &Address) -> RpcResult<Value> {
        self.query_address(methods::GET_PREP, address).await
    }

    /// P-Reps ranked `start..=end`; zero leaves a bound to the node.
    pub async fn get_preps(&self, start: u64, end: u64) -> RpcResult<Value> {
        let mut params = CallParams::new();
        if start > 0 {
            params = params.with_int("startRanking", &BigInt::from(start));
        }
        if end > 0 {
            params = params.with_int("endRanking", &BigInt::from(end));
        }
        self.query(methods::GET_PREPS, Some(params)).await
    }

    pub async fn get_main_preps(&self) -> RpcResult<Value> {
        self.query(methods::GET_MAIN_PREPS, None).await
    }

    pub async fn get_sub_preps(&self) -> RpcResult<Value> {
        self.query(methods::GET_SUB_PREPS, None).await
    }

    pub async fn get_prep_stats(&self) -> RpcResult<Value> {
        self.query(methods::GET_PREP_STATS, None).await
    }

    pub async fn get_delegation(&self, address: &Address) -> RpcResult<Value> {
        self.query_address(methods::GET_DELEGATION, address).await
    }

    pub async fn query_iscore(&self, address: &Address) -> RpcResult<Value> {
        self.query_address(methods::QUERY_ISCORE, address).await
    }

    /// Stakes `value` loop. Negative amounts are rejected.
    pub fn set_stake(&self, value: &BigInt) -> RpcResult<CallTransactionBuilder> {
        if value.is_negative() {
            return Err(RpcError::invalid_params(format!(
                "stake must not be negative: {value}"
            )));
        }
        Ok(self
            .transaction(methods::SET_STAKE)
            .params(CallParams::new().with_int("value", value)))
    }

    pub fn claim_iscore(&self) -> CallTransactionBuilder {
        self.transaction(methods::CLAIM_ISCORE)
    }

    fn transaction(&self, method: &str) -> CallTransactionBuilder {
        CallTransactionBuilder::new(SYSTEM_SCORE_ADDRESS, method)
    }
}

/// Checks a ranking bound pair for `get_preps`.
pub fn validate_ranking(start: u64, end: u64) -> RpcResult<()> {
    if !end.is_zero() && start > end {
        return Err(RpcError::invalid_params(format!(
            "start ranking {start} is greater than end ranking {end}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{TransactionData, TransactionRequest};

    struct Unreachable;

    #[async_trait::async_trait]
    impl IconProvider for Unreachable {
        async fn call(&self, _: &crate::builder::Call) -> RpcResult<Value> {
            unreachable!()
        }
        async fn send_transaction(
            &self,
            _: &crate::transaction::SignedTransaction,
        ) -> RpcResult<[u8; 32]> {
            unreachable!()
        }
        async fn estimate_step(&self, _: &crate::transaction::Transaction) -> RpcResult<BigInt> {
            unreachable!()
        }
        async fn get_transaction_result(
            &self,
            _: &[u8; 32],
        ) -> RpcResult<crate::models::TransactionResult> {
            unreachable!()
        }
        async fn get_score_api(&self, _: &Address) -> RpcResult<Value> {
            unreachable!()
        }
    }

    fn api() -> SystemApi {
        SystemApi::new(Arc::new(Unreachable))
    }

    #[test]
    fn set_stake_request() {
        let request: TransactionRequest = api().set_stake(&BigInt::from(10)).unwrap().into();
        assert_eq!(request.to, SYSTEM_SCORE_ADDRESS);
        match request.data {
            TransactionData::Call { method, params } => {
                assert_eq!(method, "setStake");
                assert_eq!(params.unwrap().get("value"), Some("0xa"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_stake_is_rejected() {
        assert!(api().set_stake(&BigInt::from(-1)).is_err());
    }

    #[test]
    fn claim_has_no_params() {
        let request = api().claim_iscore().build();
        assert_eq!(
            request.data,
            TransactionData::Call {
                method: "claimIScore".to_string(),
                params: None,
            }
        );
    }

    #[test]
    fn ranking_bounds() {
        assert!(validate_ranking(0, 0).is_ok());
        assert!(validate_ranking(5, 0).is_ok());
        assert!(validate_ranking(1, 22).is_ok());
        assert!(validate_ranking(23, 22).is_err());
    }
}

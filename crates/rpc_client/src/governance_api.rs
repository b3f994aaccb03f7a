// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// governance_api.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::builder::{
    deploy_content_from_path, CallBuilder, CallParams, CallTransactionBuilder,
    DeployTransactionBuilder,
};
use crate::error::{RpcError, RpcResult};
use crate::provider::IconProvider;
use governor_core::codec::{decode_bool, encode_bool};
use governor_core::{Address, BigInt, GOVERNANCE_SCORE_ADDRESS};
use num_traits::Signed;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Method names of the Governance SCORE.
pub mod methods {
    pub const GET_VERSION: &str = "getVersion";
    pub const GET_REVISION: &str = "getRevision";
    pub const GET_SERVICE_CONFIG: &str = "getServiceConfig";
    pub const GET_SCORE_STATUS: &str = "getScoreStatus";
    pub const GET_STEP_PRICE: &str = "getStepPrice";
    pub const GET_STEP_COSTS: &str = "getStepCosts";
    pub const GET_MAX_STEP_LIMIT: &str = "getMaxStepLimit";
    pub const IS_DEPLOYER: &str = "isDeployer";
    pub const IS_IN_SCORE_BLACK_LIST: &str = "isInScoreBlackList";
    pub const IS_IN_IMPORT_WHITE_LIST: &str = "isInImportWhiteList";

    pub const ACCEPT_SCORE: &str = "acceptScore";
    pub const REJECT_SCORE: &str = "rejectScore";
    pub const ADD_AUDITOR: &str = "addAuditor";
    pub const REMOVE_AUDITOR: &str = "removeAuditor";
    pub const SET_REVISION: &str = "setRevision";
    pub const SET_STEP_PRICE: &str = "setStepPrice";
    pub const SET_STEP_COST: &str = "setStepCost";
    pub const SET_MAX_STEP_LIMIT: &str = "setMaxStepLimit";
    pub const ADD_DEPLOYER: &str = "addDeployer";
    pub const REMOVE_DEPLOYER: &str = "removeDeployer";
    pub const ADD_TO_SCORE_BLACK_LIST: &str = "addToScoreBlackList";
    pub const REMOVE_FROM_SCORE_BLACK_LIST: &str = "removeFromScoreBlackList";
    pub const ADD_IMPORT_WHITE_LIST: &str = "addImportWhiteList";
    pub const REMOVE_IMPORT_WHITE_LIST: &str = "removeImportWhiteList";
    pub const UPDATE_SERVICE_CONFIG: &str = "updateServiceConfig";
}

/// Operation categories with a configurable step cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepType {
    Default,
    ContractCall,
    ContractCreate,
    ContractUpdate,
    ContractDestruct,
    ContractSet,
    Get,
    Set,
    Replace,
    Delete,
    Input,
    EventLog,
    ApiCall,
}

impl StepType {
    pub const ALL: [StepType; 13] = [
        StepType::Default,
        StepType::ContractCall,
        StepType::ContractCreate,
        StepType::ContractUpdate,
        StepType::ContractDestruct,
        StepType::ContractSet,
        StepType::Get,
        StepType::Set,
        StepType::Replace,
        StepType::Delete,
        StepType::Input,
        StepType::EventLog,
        StepType::ApiCall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Default => "default",
            StepType::ContractCall => "contractCall",
            StepType::ContractCreate => "contractCreate",
            StepType::ContractUpdate => "contractUpdate",
            StepType::ContractDestruct => "contractDestruct",
            StepType::ContractSet => "contractSet",
            StepType::Get => "get",
            StepType::Set => "set",
            StepType::Replace => "replace",
            StepType::Delete => "delete",
            StepType::Input => "input",
            StepType::EventLog => "eventlog",
            StepType::ApiCall => "apiCall",
        }
    }
}

impl FromStr for StepType {
    type Err = RpcError;

    fn from_str(s: &str) -> RpcResult<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| RpcError::invalid_params(format!("Invalid stepType: {s}")))
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution context a maximum step limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextType {
    Invoke,
    Query,
}

impl ContextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::Invoke => "invoke",
            ContextType::Query => "query",
        }
    }
}

impl FromStr for ContextType {
    type Err = RpcError;

    fn from_str(s: &str) -> RpcResult<Self> {
        match s {
            "invoke" => Ok(ContextType::Invoke),
            "query" => Ok(ContextType::Query),
            other => Err(RpcError::invalid_params(format!(
                "Invalid contextType: {other}"
            ))),
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access to the Governance SCORE.
pub struct GovernanceApi {
    provider: Arc<dyn IconProvider>,
}

impl GovernanceApi {
    pub fn new(provider: Arc<dyn IconProvider>) -> Self {
        Self { provider }
    }

    async fn query(&self, method: &str, params: Option<CallParams>) -> RpcResult<Value> {
        let mut builder = CallBuilder::new()
            .to(GOVERNANCE_SCORE_ADDRESS)
            .method(method);
        if let Some(params) = params {
            builder = builder.params(params);
        }
        self.provider.call(&builder.build()?).await
    }

    pub async fn get_version(&self) -> RpcResult<Value> {
        self.query(methods::GET_VERSION, None).await
    }

    pub async fn get_revision(&self) -> RpcResult<Value> {
        self.query(methods::GET_REVISION, None).await
    }

    pub async fn get_service_config(&self) -> RpcResult<Value> {
        self.query(methods::GET_SERVICE_CONFIG, None).await
    }

    pub async fn get_score_status(&self, address: &Address) -> RpcResult<Value> {
        self.query(methods::GET_SCORE_STATUS, Some(address_param(address)))
            .await
    }

    pub async fn get_step_price(&self) -> RpcResult<Value> {
        self.query(methods::GET_STEP_PRICE, None).await
    }

    pub async fn get_step_costs(&self) -> RpcResult<Value> {
        self.query(methods::GET_STEP_COSTS, None).await
    }

    pub async fn get_max_step_limit(&self, context_type: ContextType) -> RpcResult<Value> {
        let params = CallParams::new().with_str("contextType", context_type.as_str());
        self.query(methods::GET_MAX_STEP_LIMIT, Some(params)).await
    }

    pub async fn is_deployer(&self, address: &Address) -> RpcResult<Value> {
        self.query(methods::IS_DEPLOYER, Some(address_param(address)))
            .await
    }

    pub async fn is_in_score_black_list(&self, address: &Address) -> RpcResult<Value> {
        self.query(methods::IS_IN_SCORE_BLACK_LIST, Some(address_param(address)))
            .await
    }

    pub async fn is_in_import_white_list(&self, import_stmt: &str) -> RpcResult<Value> {
        self.query(
            methods::IS_IN_IMPORT_WHITE_LIST,
            Some(import_stmt_param(import_stmt)),
        )
        .await
    }

    /// Reads the `AUDIT` flag of the service config, answered as `0x0`/`0x1`.
    pub async fn check_if_audit_enabled(&self) -> RpcResult<Value> {
        let config = self.get_service_config().await?;
        let audit = config
            .get("AUDIT")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_response("service config has no AUDIT flag"))?;
        Ok(Value::String(encode_bool(decode_bool(audit)?)))
    }

    /// Replaces the Governance SCORE with the code at `path`.
    pub fn update(&self, path: impl AsRef<Path>) -> RpcResult<DeployTransactionBuilder> {
        let content = deploy_content_from_path(path)?;
        Ok(DeployTransactionBuilder::new(GOVERNANCE_SCORE_ADDRESS, content))
    }

    pub fn accept_score(&self, tx_hash: &[u8; 32]) -> CallTransactionBuilder {
        self.transaction(methods::ACCEPT_SCORE)
            .params(CallParams::new().with_bytes("txHash", tx_hash))
    }

    pub fn reject_score(&self, tx_hash: &[u8; 32], reason: &str) -> CallTransactionBuilder {
        self.transaction(methods::REJECT_SCORE).params(
            CallParams::new()
                .with_bytes("txHash", tx_hash)
                .with_str("reason", reason),
        )
    }

    pub fn add_auditor(&self, address: &Address) -> CallTransactionBuilder {
        self.address_transaction(methods::ADD_AUDITOR, address)
    }

    pub fn remove_auditor(&self, address: &Address) -> CallTransactionBuilder {
        self.address_transaction(methods::REMOVE_AUDITOR, address)
    }

    pub fn set_revision(&self, code: &BigInt, name: &str) -> RpcResult<CallTransactionBuilder> {
        non_negative("code", code)?;
        Ok(self.transaction(methods::SET_REVISION).params(
            CallParams::new()
                .with_int("code", code)
                .with_str("name", name),
        ))
    }

    pub fn set_step_price(&self, step_price: &BigInt) -> RpcResult<CallTransactionBuilder> {
        non_negative("stepPrice", step_price)?;
        Ok(self
            .transaction(methods::SET_STEP_PRICE)
            .params(CallParams::new().with_int("stepPrice", step_price)))
    }

    pub fn set_step_cost(&self, step_type: StepType, cost: &BigInt) -> CallTransactionBuilder {
        self.transaction(methods::SET_STEP_COST).params(
            CallParams::new()
                .with_str("stepType", step_type.as_str())
                .with_int("cost", cost),
        )
    }

    pub fn set_max_step_limit(
        &self,
        context_type: ContextType,
        value: &BigInt,
    ) -> RpcResult<CallTransactionBuilder> {
        non_negative("value", value)?;
        Ok(self.transaction(methods::SET_MAX_STEP_LIMIT).params(
            CallParams::new()
                .with_str("contextType", context_type.as_str())
                .with_int("value", value),
        ))
    }

    pub fn add_deployer(&self, address: &Address) -> CallTransactionBuilder {
        self.address_transaction(methods::ADD_DEPLOYER, address)
    }

    pub fn remove_deployer(&self, address: &Address) -> CallTransactionBuilder {
        self.address_transaction(methods::REMOVE_DEPLOYER, address)
    }

    pub fn add_to_score_black_list(&self, address: &Address) -> CallTransactionBuilder {
        self.address_transaction(methods::ADD_TO_SCORE_BLACK_LIST, address)
    }

    pub fn remove_from_score_black_list(&self, address: &Address) -> CallTransactionBuilder {
        self.address_transaction(methods::REMOVE_FROM_SCORE_BLACK_LIST, address)
    }

    pub fn add_import_white_list(&self, import_stmt: &str) -> CallTransactionBuilder {
        self.transaction(methods::ADD_IMPORT_WHITE_LIST)
            .params(import_stmt_param(import_stmt))
    }

    pub fn remove_import_white_list(&self, import_stmt: &str) -> CallTransactionBuilder {
        self.transaction(methods::REMOVE_IMPORT_WHITE_LIST)
            .params(import_stmt_param(import_stmt))
    }

    pub fn update_service_config(&self, service_flag: &BigInt) -> RpcResult<CallTransactionBuilder> {
        non_negative("serviceFlag", service_flag)?;
        Ok(self
            .transaction(methods::UPDATE_SERVICE_CONFIG)
            .params(CallParams::new().with_int("serviceFlag", service_flag)))
    }

    fn transaction(&self, method: &str) -> CallTransactionBuilder {
        CallTransactionBuilder::new(GOVERNANCE_SCORE_ADDRESS, method)
    }

    fn address_transaction(&self, method: &str, address: &Address) -> CallTransactionBuilder {
        self.transaction(method).params(address_param(address))
    }
}

fn address_param(address: &Address) -> CallParams {
    CallParams::new().with_address("address", address)
}

fn import_stmt_param(import_stmt: &str) -> CallParams {
    CallParams::new().with_str("importStmt", import_stmt)
}

fn non_negative(name: &str, value: &BigInt) -> RpcResult<()> {
    if value.is_negative() {
        return Err(RpcError::invalid_params(format!(
            "{name} must not be negative: {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_types_parse() {
        for ty in StepType::ALL {
            assert_eq!(ty.as_str().parse::<StepType>().unwrap(), ty);
        }
        assert_eq!("eventlog".parse::<StepType>().unwrap(), StepType::EventLog);

        let err = "contractcall".parse::<StepType>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid parameters: Invalid stepType: contractcall");
    }

    #[test]
    fn context_types_parse() {
        assert_eq!("invoke".parse::<ContextType>().unwrap(), ContextType::Invoke);
        assert_eq!("query".parse::<ContextType>().unwrap(), ContextType::Query);
        assert!("Invoke".parse::<ContextType>().is_err());
        assert!("".parse::<ContextType>().is_err());
    }

    #[test]
    fn non_negative_checks() {
        assert!(non_negative("value", &BigInt::from(0)).is_ok());
        assert!(non_negative("value", &BigInt::from(-1)).is_err());
    }
}

//! Commands of the Governance SCORE.

use super::{not_a_query, not_a_transaction, parse_address, parse_number, parse_tx_hash};
use crate::args::Command;
use crate::Result;
use governor_core::{Address, BigInt};
use governor_rpc_client::{ContextType, GovernanceApi, StepType, TransactionRequest};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceOp {
    GetVersion,
    GetRevision,
    GetServiceConfig,
    GetScoreStatus(Address),
    GetStepPrice,
    GetStepCosts,
    GetMaxStepLimit(ContextType),
    IsDeployer(Address),
    IsInScoreBlackList(Address),
    IsInImportWhiteList(String),
    CheckIfAuditEnabled,

    Update(PathBuf),
    AcceptScore([u8; 32]),
    RejectScore { tx_hash: [u8; 32], reason: String },
    AddAuditor(Address),
    RemoveAuditor(Address),
    SetRevision { code: BigInt, name: String },
    SetStepPrice(BigInt),
    SetStepCost { step_type: StepType, cost: BigInt },
    SetMaxStepLimit { context_type: ContextType, value: BigInt },
    AddDeployer(Address),
    RemoveDeployer(Address),
    AddToScoreBlackList(Address),
    RemoveFromScoreBlackList(Address),
    AddImportWhiteList(String),
    RemoveImportWhiteList(String),
    UpdateServiceConfig(BigInt),
}

impl GovernanceOp {
    /// Returns `None` for commands of other SCOREs.
    pub fn parse(command: &Command) -> Result<Option<Self>> {
        use GovernanceOp as Op;

        let op = match command {
            Command::GetVersion => Op::GetVersion,
            Command::GetRevision => Op::GetRevision,
            Command::GetServiceConfig => Op::GetServiceConfig,
            Command::GetScoreStatus { address } => Op::GetScoreStatus(parse_address(address)?),
            Command::GetStepPrice => Op::GetStepPrice,
            Command::GetStepCosts => Op::GetStepCosts,
            Command::GetMaxStepLimit { context_type } => {
                Op::GetMaxStepLimit(context_type.parse()?)
            }
            Command::IsDeployer { address } => Op::IsDeployer(parse_address(address)?),
            Command::IsInScoreBlackList { address } => {
                Op::IsInScoreBlackList(parse_address(address)?)
            }
            Command::IsInImportWhiteList { import_stmt } => {
                Op::IsInImportWhiteList(import_stmt.clone())
            }
            Command::CheckIfAuditEnabled => Op::CheckIfAuditEnabled,

            Command::Update { score_path } => Op::Update(score_path.clone()),
            Command::AcceptScore { tx_hash } => Op::AcceptScore(parse_tx_hash(tx_hash)?),
            Command::RejectScore { tx_hash, reason } => Op::RejectScore {
                tx_hash: parse_tx_hash(tx_hash)?,
                reason: reason.clone(),
            },
            Command::AddAuditor { address } => Op::AddAuditor(parse_address(address)?),
            Command::RemoveAuditor { address } => Op::RemoveAuditor(parse_address(address)?),
            Command::SetRevision { code, name } => Op::SetRevision {
                code: parse_number("code", code)?,
                name: name.clone(),
            },
            Command::SetStepPrice { step_price } => {
                Op::SetStepPrice(parse_number("stepPrice", step_price)?)
            }
            Command::SetStepCost { step_type, cost } => Op::SetStepCost {
                step_type: step_type.parse()?,
                cost: parse_number("cost", cost)?,
            },
            Command::SetMaxStepLimit {
                context_type,
                value,
            } => Op::SetMaxStepLimit {
                context_type: context_type.parse()?,
                value: parse_number("value", value)?,
            },
            Command::AddDeployer { address } => Op::AddDeployer(parse_address(address)?),
            Command::RemoveDeployer { address } => Op::RemoveDeployer(parse_address(address)?),
            Command::AddToScoreBlackList { address } => {
                Op::AddToScoreBlackList(parse_address(address)?)
            }
            Command::RemoveFromScoreBlackList { address } => {
                Op::RemoveFromScoreBlackList(parse_address(address)?)
            }
            Command::AddImportWhiteList { import_stmt } => {
                Op::AddImportWhiteList(import_stmt.clone())
            }
            Command::RemoveImportWhiteList { import_stmt } => {
                Op::RemoveImportWhiteList(import_stmt.clone())
            }
            Command::UpdateServiceConfig { service_flag } => {
                Op::UpdateServiceConfig(parse_number("serviceFlag", service_flag)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(op))
    }

    pub fn name(&self) -> &'static str {
        use GovernanceOp as Op;

        match self {
            Op::GetVersion => "getVersion",
            Op::GetRevision => "getRevision",
            Op::GetServiceConfig => "getServiceConfig",
            Op::GetScoreStatus(_) => "getScoreStatus",
            Op::GetStepPrice => "getStepPrice",
            Op::GetStepCosts => "getStepCosts",
            Op::GetMaxStepLimit(_) => "getMaxStepLimit",
            Op::IsDeployer(_) => "isDeployer",
            Op::IsInScoreBlackList(_) => "isInScoreBlackList",
            Op::IsInImportWhiteList(_) => "isInImportWhiteList",
            Op::CheckIfAuditEnabled => "checkIfAuditEnabled",
            Op::Update(_) => "update",
            Op::AcceptScore(_) => "acceptScore",
            Op::RejectScore { .. } => "rejectScore",
            Op::AddAuditor(_) => "addAuditor",
            Op::RemoveAuditor(_) => "removeAuditor",
            Op::SetRevision { .. } => "setRevision",
            Op::SetStepPrice(_) => "setStepPrice",
            Op::SetStepCost { .. } => "setStepCost",
            Op::SetMaxStepLimit { .. } => "setMaxStepLimit",
            Op::AddDeployer(_) => "addDeployer",
            Op::RemoveDeployer(_) => "removeDeployer",
            Op::AddToScoreBlackList(_) => "addToScoreBlackList",
            Op::RemoveFromScoreBlackList(_) => "removeFromScoreBlackList",
            Op::AddImportWhiteList(_) => "addImportWhiteList",
            Op::RemoveImportWhiteList(_) => "removeImportWhiteList",
            Op::UpdateServiceConfig(_) => "updateServiceConfig",
        }
    }

    pub async fn query(&self, api: &GovernanceApi) -> Result<Value> {
        use GovernanceOp as Op;

        let value = match self {
            Op::GetVersion => api.get_version().await?,
            Op::GetRevision => api.get_revision().await?,
            Op::GetServiceConfig => api.get_service_config().await?,
            Op::GetScoreStatus(address) => api.get_score_status(address).await?,
            Op::GetStepPrice => api.get_step_price().await?,
            Op::GetStepCosts => api.get_step_costs().await?,
            Op::GetMaxStepLimit(context_type) => api.get_max_step_limit(*context_type).await?,
            Op::IsDeployer(address) => api.is_deployer(address).await?,
            Op::IsInScoreBlackList(address) => api.is_in_score_black_list(address).await?,
            Op::IsInImportWhiteList(import_stmt) => {
                api.is_in_import_white_list(import_stmt).await?
            }
            Op::CheckIfAuditEnabled => api.check_if_audit_enabled().await?,
            _ => return Err(not_a_query(self.name())),
        };
        Ok(value)
    }

    pub fn transaction(&self, api: &GovernanceApi) -> Result<TransactionRequest> {
        use GovernanceOp as Op;

        let request = match self {
            Op::Update(path) => api.update(path)?.build(),
            Op::AcceptScore(tx_hash) => api.accept_score(tx_hash).build(),
            Op::RejectScore { tx_hash, reason } => api.reject_score(tx_hash, reason).build(),
            Op::AddAuditor(address) => api.add_auditor(address).build(),
            Op::RemoveAuditor(address) => api.remove_auditor(address).build(),
            Op::SetRevision { code, name } => api.set_revision(code, name)?.build(),
            Op::SetStepPrice(step_price) => api.set_step_price(step_price)?.build(),
            Op::SetStepCost { step_type, cost } => api.set_step_cost(*step_type, cost).build(),
            Op::SetMaxStepLimit {
                context_type,
                value,
            } => api.set_max_step_limit(*context_type, value)?.build(),
            Op::AddDeployer(address) => api.add_deployer(address).build(),
            Op::RemoveDeployer(address) => api.remove_deployer(address).build(),
            Op::AddToScoreBlackList(address) => api.add_to_score_black_list(address).build(),
            Op::RemoveFromScoreBlackList(address) => {
                api.remove_from_score_black_list(address).build()
            }
            Op::AddImportWhiteList(import_stmt) => api.add_import_white_list(import_stmt).build(),
            Op::RemoveImportWhiteList(import_stmt) => {
                api.remove_import_white_list(import_stmt).build()
            }
            Op::UpdateServiceConfig(flag) => api.update_service_config(flag)?.build(),
            _ => return Err(not_a_transaction(self.name())),
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::lookup;
    use governor_rpc_client::{
        Call, IconProvider, RpcResult, SignedTransaction, Transaction, TransactionData,
        TransactionResult,
    };
    use std::sync::Arc;

    struct Offline;

    #[async_trait::async_trait]
    impl IconProvider for Offline {
        async fn call(&self, _: &Call) -> RpcResult<Value> {
            unreachable!("no network in these tests")
        }
        async fn send_transaction(&self, _: &SignedTransaction) -> RpcResult<[u8; 32]> {
            unreachable!()
        }
        async fn estimate_step(&self, _: &Transaction) -> RpcResult<BigInt> {
            unreachable!()
        }
        async fn get_transaction_result(&self, _: &[u8; 32]) -> RpcResult<TransactionResult> {
            unreachable!()
        }
        async fn get_score_api(&self, _: &Address) -> RpcResult<Value> {
            unreachable!()
        }
    }

    fn api() -> GovernanceApi {
        GovernanceApi::new(Arc::new(Offline))
    }

    #[test]
    fn test_invalid_step_type_fails_parsing() {
        let err = GovernanceOp::parse(&Command::SetStepCost {
            step_type: "cpu".into(),
            cost: "100".into(),
        })
        .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid stepType: cpu"));
    }

    #[test]
    fn test_invalid_context_type_fails_parsing() {
        for command in [
            Command::SetMaxStepLimit {
                context_type: "call".into(),
                value: "100".into(),
            },
            Command::GetMaxStepLimit {
                context_type: "call".into(),
            },
        ] {
            let err = GovernanceOp::parse(&command).unwrap_err();
            assert!(err.to_string().contains("Invalid contextType: call"));
        }
    }

    #[test]
    fn test_write_methods_match_command_table() {
        let address: Address = "hxbe258ceb872e08851f1f59694dac2558708ece11".parse().unwrap();
        let ops = [
            GovernanceOp::AcceptScore([1; 32]),
            GovernanceOp::RejectScore {
                tx_hash: [2; 32],
                reason: "bad code".into(),
            },
            GovernanceOp::AddAuditor(address),
            GovernanceOp::RemoveAuditor(address),
            GovernanceOp::SetRevision {
                code: BigInt::from(17),
                name: "1.8.0".into(),
            },
            GovernanceOp::SetStepPrice(BigInt::from(12_500_000_000u64)),
            GovernanceOp::SetStepCost {
                step_type: StepType::ApiCall,
                cost: BigInt::from(10_000),
            },
            GovernanceOp::SetMaxStepLimit {
                context_type: ContextType::Query,
                value: BigInt::from(50_000_000),
            },
            GovernanceOp::AddDeployer(address),
            GovernanceOp::RemoveDeployer(address),
            GovernanceOp::AddToScoreBlackList(address),
            GovernanceOp::RemoveFromScoreBlackList(address),
            GovernanceOp::AddImportWhiteList("{'os': ['path']}".into()),
            GovernanceOp::RemoveImportWhiteList("{'os': ['path']}".into()),
            GovernanceOp::UpdateServiceConfig(BigInt::from(3)),
        ];

        for op in ops {
            let spec = lookup(op.name()).unwrap();
            assert!(!spec.readonly);
            match op.transaction(&api()).unwrap().data {
                TransactionData::Call { method, .. } => assert_eq!(method, spec.method),
                other => panic!("{} built {other:?}", op.name()),
            }
        }
    }

    #[test]
    fn test_set_step_cost_params() {
        let request = GovernanceOp::SetStepCost {
            step_type: StepType::ContractCall,
            cost: BigInt::from(25_000),
        }
        .transaction(&api())
        .unwrap();
        let TransactionData::Call { params, .. } = request.data else {
            panic!("expected a call");
        };
        let params = params.unwrap();
        assert_eq!(params.get("stepType"), Some("contractCall"));
        assert_eq!(params.get("cost"), Some("0x61a8"));
    }

    #[test]
    fn test_update_with_bad_path_is_validation() {
        let dir = tempfile::tempdir().unwrap();
        let err = GovernanceOp::Update(dir.path().join("missing.txt"))
            .transaction(&api())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_from_jar() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("governance.jar");
        std::fs::write(&jar, b"PK\x03\x04jar").unwrap();
        let request = GovernanceOp::Update(jar).transaction(&api()).unwrap();
        assert_eq!(request.data.data_type(), "deploy");
    }

    #[test]
    fn test_reads_are_not_transactions() {
        assert!(GovernanceOp::GetVersion.transaction(&api()).is_err());
    }
}

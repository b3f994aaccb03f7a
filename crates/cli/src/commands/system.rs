//! Commands of the System SCORE.

use super::{not_a_query, not_a_transaction, parse_number, parse_optional_address};
use crate::args::Command;
use crate::{CliError, Result};
use governor_core::{Address, BigInt};
use governor_rpc_client::system_api::validate_ranking;
use governor_rpc_client::{SystemApi, TransactionRequest};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemOp {
    Stake(Option<Address>),
    PRep(Option<Address>),
    PReps { start: u64, end: u64 },
    MainPReps,
    SubPReps,
    PRepStats,
    Delegation(Option<Address>),
    IScore(Option<Address>),
    SetStake(BigInt),
    ClaimIScore,
}

impl SystemOp {
    /// Returns `None` for commands of other SCOREs.
    pub fn parse(command: &Command) -> Result<Option<Self>> {
        let op = match command {
            Command::Stake { address } => SystemOp::Stake(parse_optional_address(address)?),
            Command::Prep { address } => SystemOp::PRep(parse_optional_address(address)?),
            Command::Preps { start, end } => {
                validate_ranking(*start, *end)?;
                SystemOp::PReps {
                    start: *start,
                    end: *end,
                }
            }
            Command::MainPReps => SystemOp::MainPReps,
            Command::SubPReps => SystemOp::SubPReps,
            Command::PRepStats => SystemOp::PRepStats,
            Command::Delegation { address } => {
                SystemOp::Delegation(parse_optional_address(address)?)
            }
            Command::IScore { address } => SystemOp::IScore(parse_optional_address(address)?),
            Command::SetStake { stake } => SystemOp::SetStake(parse_number("stake", stake)?),
            Command::ClaimIScore => SystemOp::ClaimIScore,
            _ => return Ok(None),
        };
        Ok(Some(op))
    }

    pub fn name(&self) -> &'static str {
        match self {
            SystemOp::Stake(_) => "stake",
            SystemOp::PRep(_) => "prep",
            SystemOp::PReps { .. } => "preps",
            SystemOp::MainPReps => "mainpreps",
            SystemOp::SubPReps => "subpreps",
            SystemOp::PRepStats => "prepStats",
            SystemOp::Delegation(_) => "delegation",
            SystemOp::IScore(_) => "iscore",
            SystemOp::SetStake(_) => "setStake",
            SystemOp::ClaimIScore => "claimIScore",
        }
    }

    pub fn account_mut(&mut self) -> Option<&mut Option<Address>> {
        match self {
            SystemOp::Stake(account)
            | SystemOp::PRep(account)
            | SystemOp::Delegation(account)
            | SystemOp::IScore(account) => Some(account),
            _ => None,
        }
    }

    pub async fn query(&self, api: &SystemApi) -> Result<Value> {
        let value = match self {
            SystemOp::Stake(account) => api.get_stake(&required(account)?).await?,
            SystemOp::PRep(account) => api.get_prep(&required(account)?).await?,
            SystemOp::PReps { start, end } => api.get_preps(*start, *end).await?,
            SystemOp::MainPReps => api.get_main_preps().await?,
            SystemOp::SubPReps => api.get_sub_preps().await?,
            SystemOp::PRepStats => api.get_prep_stats().await?,
            SystemOp::Delegation(account) => api.get_delegation(&required(account)?).await?,
            SystemOp::IScore(account) => api.query_iscore(&required(account)?).await?,
            SystemOp::SetStake(_) | SystemOp::ClaimIScore => return Err(not_a_query(self.name())),
        };
        Ok(value)
    }

    pub fn transaction(&self, api: &SystemApi) -> Result<TransactionRequest> {
        let builder = match self {
            SystemOp::SetStake(stake) => api.set_stake(stake)?,
            SystemOp::ClaimIScore => api.claim_iscore(),
            _ => return Err(not_a_transaction(self.name())),
        };
        Ok(builder.build())
    }
}

fn required(account: &Option<Address>) -> Result<Address> {
    account.ok_or_else(|| CliError::validation("address is required"))
}

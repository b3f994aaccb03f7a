//! Node-level commands that work with any SCORE or transaction.

use super::{parse_address, parse_tx_hash};
use crate::args::Command;
use crate::Result;
use governor_core::codec::encode_bytes;
use governor_core::Address;
use governor_rpc_client::IconProvider;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreOp {
    ScoreApi(Address),
    TxResult([u8; 32]),
}

impl ScoreOp {
    /// Returns `None` for SCORE-specific commands.
    pub fn parse(command: &Command) -> Result<Option<Self>> {
        let op = match command {
            Command::GetScoreApi { address } => ScoreOp::ScoreApi(parse_address(address)?),
            Command::TxResult { tx_hash } => ScoreOp::TxResult(parse_tx_hash(tx_hash)?),
            _ => return Ok(None),
        };
        Ok(Some(op))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoreOp::ScoreApi(_) => "getScoreApi",
            ScoreOp::TxResult(_) => "txresult",
        }
    }

    pub async fn query(&self, provider: &dyn IconProvider) -> Result<Value> {
        match self {
            ScoreOp::ScoreApi(address) => Ok(provider.get_score_api(address).await?),
            ScoreOp::TxResult(tx_hash) => {
                let result = provider.get_transaction_result(tx_hash).await?;
                if let Some(failure) = &result.failure {
                    warn!(
                        tx_hash = %encode_bytes(tx_hash),
                        code = %failure.code,
                        message = %failure.message,
                        "transaction failed"
                    );
                }
                Ok(result.raw)
            }
        }
    }
}

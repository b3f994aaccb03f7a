//! Command table and dispatch.
//!
//! Every subcommand has a [`CommandSpec`] in [`COMMANDS`]. Its `readonly`
//! flag picks the path: read commands call the SCORE and print the decoded
//! result, write commands go through the [`Invoker`]. Arguments are parsed
//! into an [`Operation`] before a wallet is unlocked or a request is sent.

pub mod governance;
pub mod score;
pub mod system;

use crate::args::{parse_integer, Cli, Command};
use crate::config::{FileConfig, Settings};
use crate::console_service::{read_password, ConsoleConfirmation};
use crate::printer;
use crate::{CliError, Result};
use governor_core::codec::decode_bytes;
use governor_core::schema::{
    GET_DELEGATION, GET_PREP, GET_PREPS, GET_REVISION, GET_SCORE_STATUS, GET_STAKE, QUERY_ISCORE,
    TX_RESULT,
};
use governor_core::{Address, BigInt, Schema, GOVERNANCE_SCORE_ADDRESS, SYSTEM_SCORE_ADDRESS};
use governor_rpc_client::governance_api::methods as gov;
use governor_rpc_client::system_api::methods as sys;
use governor_rpc_client::{
    AutoConfirm, Confirmation, IconProvider, Invoker, RpcClient, TransactionRequest,
};
use governor_wallets::{KeyWallet, Keystore, TransactionSigner, WatchOnlyAccount};
use std::sync::Arc;
use tracing::{debug, info};

pub use governance::GovernanceOp;
pub use score::ScoreOp;
pub use system::SystemOp;

/// How the result of a read command is decoded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Record(&'static Schema),
    Int,
    /// Loop amount shown as ICX
    Icx,
    Bool,
    Str,
    /// Object of hex integers
    IntMap,
    /// Pretty JSON as received
    Raw,
}

/// Static description of one subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Target SCORE, `None` for node-level methods.
    pub score: Option<Address>,
    pub readonly: bool,
    pub method: &'static str,
    /// Decode rule, present for read commands.
    pub result: Option<ResultKind>,
}

const fn system_read(name: &'static str, method: &'static str, result: ResultKind) -> CommandSpec {
    CommandSpec {
        name,
        score: Some(SYSTEM_SCORE_ADDRESS),
        readonly: true,
        method,
        result: Some(result),
    }
}

const fn system_write(name: &'static str, method: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        score: Some(SYSTEM_SCORE_ADDRESS),
        readonly: false,
        method,
        result: None,
    }
}

const fn governance_read(
    name: &'static str,
    method: &'static str,
    result: ResultKind,
) -> CommandSpec {
    CommandSpec {
        name,
        score: Some(GOVERNANCE_SCORE_ADDRESS),
        readonly: true,
        method,
        result: Some(result),
    }
}

const fn governance_write(name: &'static str, method: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        score: Some(GOVERNANCE_SCORE_ADDRESS),
        readonly: false,
        method,
        result: None,
    }
}

/// Method name recorded for `update`, which deploys instead of calling.
pub const DEPLOY_METHOD: &str = "deploy";

pub static COMMANDS: &[CommandSpec] = &[
    system_read("stake", sys::GET_STAKE, ResultKind::Record(&GET_STAKE)),
    system_read("prep", sys::GET_PREP, ResultKind::Record(&GET_PREP)),
    system_read("preps", sys::GET_PREPS, ResultKind::Record(&GET_PREPS)),
    system_read("mainpreps", sys::GET_MAIN_PREPS, ResultKind::Raw),
    system_read("subpreps", sys::GET_SUB_PREPS, ResultKind::Raw),
    system_read("prepStats", sys::GET_PREP_STATS, ResultKind::Record(&GET_PREPS)),
    system_read("delegation", sys::GET_DELEGATION, ResultKind::Record(&GET_DELEGATION)),
    system_read("iscore", sys::QUERY_ISCORE, ResultKind::Record(&QUERY_ISCORE)),
    system_write("setStake", sys::SET_STAKE),
    system_write("claimIScore", sys::CLAIM_ISCORE),
    governance_read("getVersion", gov::GET_VERSION, ResultKind::Str),
    governance_read("getRevision", gov::GET_REVISION, ResultKind::Record(&GET_REVISION)),
    governance_read("getServiceConfig", gov::GET_SERVICE_CONFIG, ResultKind::Raw),
    governance_read(
        "getScoreStatus",
        gov::GET_SCORE_STATUS,
        ResultKind::Record(&GET_SCORE_STATUS),
    ),
    governance_read("getStepPrice", gov::GET_STEP_PRICE, ResultKind::Icx),
    governance_read("getStepCosts", gov::GET_STEP_COSTS, ResultKind::IntMap),
    governance_read("getMaxStepLimit", gov::GET_MAX_STEP_LIMIT, ResultKind::Int),
    governance_read("isDeployer", gov::IS_DEPLOYER, ResultKind::Bool),
    governance_read("isInScoreBlackList", gov::IS_IN_SCORE_BLACK_LIST, ResultKind::Bool),
    governance_read("isInImportWhiteList", gov::IS_IN_IMPORT_WHITE_LIST, ResultKind::Bool),
    governance_read("checkIfAuditEnabled", gov::GET_SERVICE_CONFIG, ResultKind::Bool),
    governance_write("update", DEPLOY_METHOD),
    governance_write("acceptScore", gov::ACCEPT_SCORE),
    governance_write("rejectScore", gov::REJECT_SCORE),
    governance_write("addAuditor", gov::ADD_AUDITOR),
    governance_write("removeAuditor", gov::REMOVE_AUDITOR),
    governance_write("setRevision", gov::SET_REVISION),
    governance_write("setStepPrice", gov::SET_STEP_PRICE),
    governance_write("setStepCost", gov::SET_STEP_COST),
    governance_write("setMaxStepLimit", gov::SET_MAX_STEP_LIMIT),
    governance_write("addDeployer", gov::ADD_DEPLOYER),
    governance_write("removeDeployer", gov::REMOVE_DEPLOYER),
    governance_write("addToScoreBlackList", gov::ADD_TO_SCORE_BLACK_LIST),
    governance_write("removeFromScoreBlackList", gov::REMOVE_FROM_SCORE_BLACK_LIST),
    governance_write("addImportWhiteList", gov::ADD_IMPORT_WHITE_LIST),
    governance_write("removeImportWhiteList", gov::REMOVE_IMPORT_WHITE_LIST),
    governance_write("updateServiceConfig", gov::UPDATE_SERVICE_CONFIG),
    CommandSpec {
        name: "getScoreApi",
        score: None,
        readonly: true,
        method: "icx_getScoreApi",
        result: Some(ResultKind::Raw),
    },
    CommandSpec {
        name: "txresult",
        score: None,
        readonly: true,
        method: "icx_getTransactionResult",
        result: Some(ResultKind::Record(&TX_RESULT)),
    },
];

/// Finds the table entry of a subcommand.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// A subcommand with its arguments parsed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    System(SystemOp),
    Governance(GovernanceOp),
    Score(ScoreOp),
}

impl Operation {
    pub fn parse(command: &Command) -> Result<Self> {
        if let Some(op) = SystemOp::parse(command)? {
            return Ok(Operation::System(op));
        }
        if let Some(op) = GovernanceOp::parse(command)? {
            return Ok(Operation::Governance(op));
        }
        if let Some(op) = ScoreOp::parse(command)? {
            return Ok(Operation::Score(op));
        }
        Err(CliError::validation(format!(
            "Unsupported command: {}",
            command.name()
        )))
    }

    /// The account a read command reports on, when it takes one.
    pub fn account_mut(&mut self) -> Option<&mut Option<Address>> {
        match self {
            Operation::System(op) => op.account_mut(),
            Operation::Governance(_) | Operation::Score(_) => None,
        }
    }

    /// Runs a read command and returns the raw result.
    pub async fn query(&self, provider: Arc<dyn IconProvider>) -> Result<serde_json::Value> {
        match self {
            Operation::System(op) => op.query(&governor_rpc_client::SystemApi::new(provider)).await,
            Operation::Governance(op) => {
                op.query(&governor_rpc_client::GovernanceApi::new(provider))
                    .await
            }
            Operation::Score(op) => op.query(provider.as_ref()).await,
        }
    }

    /// Builds the transaction of a write command.
    pub fn transaction(&self, provider: Arc<dyn IconProvider>) -> Result<TransactionRequest> {
        match self {
            Operation::System(op) => op.transaction(&governor_rpc_client::SystemApi::new(provider)),
            Operation::Governance(op) => {
                op.transaction(&governor_rpc_client::GovernanceApi::new(provider))
            }
            Operation::Score(op) => Err(not_a_transaction(op.name())),
        }
    }
}

/// Executes one parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    let spec = lookup(command.name())
        .ok_or_else(|| CliError::validation(format!("Unsupported command: {}", command.name())))?;
    let operation = Operation::parse(&command)?;

    let file = FileConfig::load(global.config.as_deref())?;
    let settings = Settings::resolve(&global, &file)?;
    let client = RpcClient::with_config(&settings.url, settings.timeout, printer::console_hooks())?;
    let provider: Arc<dyn IconProvider> = Arc::new(client);

    debug!(
        command = spec.name,
        method = spec.method,
        url = %settings.url,
        readonly = spec.readonly,
        "dispatching command"
    );

    if spec.readonly {
        read(spec, operation, provider, &settings).await
    } else {
        write(operation, provider, &settings).await
    }
}

async fn read(
    spec: &CommandSpec,
    mut operation: Operation,
    provider: Arc<dyn IconProvider>,
    settings: &Settings,
) -> Result<()> {
    if let Some(account) = operation.account_mut() {
        if account.is_none() {
            *account = Some(keystore_account(settings)?);
        }
    }

    let kind = spec.result.unwrap_or(ResultKind::Raw);
    let json = operation.query(provider).await?;
    printer::print_result(kind, spec.name, &json)
}

async fn write(
    operation: Operation,
    provider: Arc<dyn IconProvider>,
    settings: &Settings,
) -> Result<()> {
    let request = operation.transaction(provider.clone())?;
    let nid = settings.require_nid()?;

    // estimates only need the sender address, so the key stays locked
    let signer: Arc<dyn TransactionSigner> = if settings.estimate {
        let keystore = Keystore::load(settings.require_keystore()?)?;
        Arc::new(WatchOnlyAccount::new(keystore.address))
    } else {
        Arc::new(unlock_wallet(settings)?)
    };
    let confirmation: Box<dyn Confirmation> = if settings.estimate {
        Box::new(AutoConfirm)
    } else {
        Box::new(ConsoleConfirmation::stdin().assume_yes(settings.yes))
    };

    let invoker = Invoker::new(provider, signer, nid, confirmation)
        .with_step_limit(settings.step_limit.clone())
        .with_estimate(settings.estimate);
    let outcome = invoker.invoke(request).await?;

    printer::print_title("Result");
    println!("{outcome}");
    Ok(())
}

/// Address of the `--keystore` file, read without a password.
fn keystore_account(settings: &Settings) -> Result<Address> {
    let path = settings.keystore.as_deref().ok_or_else(|| {
        CliError::validation("address is required; pass it or use --keystore")
    })?;
    Ok(Keystore::load(path)?.address)
}

fn unlock_wallet(settings: &Settings) -> Result<KeyWallet> {
    let keystore = Keystore::load(settings.require_keystore()?)?;
    let password = match &settings.password {
        Some(password) => password.clone(),
        None => read_password()?,
    };
    let wallet = keystore.decrypt(&password)?;
    info!(address = %wallet.address(), "wallet unlocked");
    Ok(wallet)
}

pub(crate) fn parse_address(text: &str) -> Result<Address> {
    Ok(text.parse()?)
}

pub(crate) fn parse_optional_address(text: &Option<String>) -> Result<Option<Address>> {
    text.as_deref().map(parse_address).transpose()
}

pub(crate) fn parse_number(name: &str, text: &str) -> Result<BigInt> {
    parse_integer(text).ok_or_else(|| CliError::validation(format!("Invalid {name}: {text}")))
}

/// Parses a `0x`-prefixed 32-byte transaction hash.
pub(crate) fn parse_tx_hash(text: &str) -> Result<[u8; 32]> {
    let invalid = || CliError::validation(format!("Invalid txHash: {text}"));
    let bytes = decode_bytes(text).map_err(|_| invalid())?;
    bytes.try_into().map_err(|_| invalid())
}

pub(crate) fn not_a_transaction(name: &str) -> CliError {
    CliError::validation(format!("{name} does not send a transaction"))
}

pub(crate) fn not_a_query(name: &str) -> CliError {
    CliError::validation(format!("{name} is not a read command"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_every_subcommand_has_a_spec() {
        let parser = Cli::command();
        let names: Vec<_> = parser
            .get_subcommands()
            .map(|subcommand| subcommand.get_name())
            .filter(|name| *name != "help")
            .collect();
        for name in &names {
            let spec = lookup(name).unwrap_or_else(|| panic!("no spec for {name}"));
            assert_eq!(spec.readonly, spec.result.is_some(), "{name}");
        }
        assert_eq!(COMMANDS.len(), names.len());
    }

    #[test]
    fn test_names_are_unique() {
        for (index, spec) in COMMANDS.iter().enumerate() {
            assert!(
                COMMANDS[index + 1..].iter().all(|other| other.name != spec.name),
                "{} listed twice",
                spec.name
            );
        }
    }

    #[test]
    fn test_parse_tx_hash() {
        let hash = format!("0x{}", "ab".repeat(32));
        assert_eq!(parse_tx_hash(&hash).unwrap(), [0xab; 32]);
        assert!(parse_tx_hash("0xabcd").is_err());
        assert!(parse_tx_hash(&"ab".repeat(32)).is_err());
    }

    #[test]
    fn test_invalid_address_is_validation() {
        let cli = Cli::parse_from(["governor", "addAuditor", "hx1234"]);
        assert!(Operation::parse(&cli.command).unwrap_err().is_validation());
    }

    #[test]
    fn test_account_slot_only_for_account_reads() {
        let mut op = Operation::parse(&Command::Stake { address: None }).unwrap();
        assert_eq!(op.account_mut(), Some(&mut None));

        let mut op = Operation::parse(&Command::GetVersion).unwrap();
        assert_eq!(op.account_mut(), None);
    }
}

use clap::{Args, Parser, Subcommand, ValueEnum};
use governor_core::codec::decode_int;
use governor_core::BigInt;
use std::path::PathBuf;

/// Command-line arguments for governor
#[derive(Parser, Debug, Clone)]
#[command(
    name = "governor",
    version = env!("CARGO_PKG_VERSION"),
    about = "Client for the System and Governance SCOREs of an ICON node",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Node url or network name (mainnet, lisbon, berlin, sejong, localhost)
    #[arg(short = 'u', long = "url", global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Network id, decimal or 0x-prefixed hex
    #[arg(short = 'n', long = "nid", global = true, value_name = "NID")]
    pub nid: Option<String>,

    /// Keystore file of the sender, or of the account to query
    #[arg(short = 'k', long = "keystore", global = true, value_name = "FILE")]
    pub keystore: Option<PathBuf>,

    /// Keystore password; prompted for when absent
    #[arg(
        short = 'p',
        long = "password",
        global = true,
        env = "GOVERNOR_PASSWORD",
        hide_env_values = true,
        value_name = "PASSWORD"
    )]
    pub password: Option<String>,

    /// Step limit of transactions, decimal or 0x-prefixed hex
    #[arg(short = 's', long = "step-limit", global = true, value_name = "STEPS")]
    pub step_limit: Option<String>,

    /// Estimate the steps of a transaction instead of sending it
    #[arg(short = 'e', long = "estimate", global = true)]
    pub estimate: bool,

    /// Send transactions without asking for confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Configuration file
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long = "verbose", value_enum, global = true, default_value = "warn")]
    pub verbose: LogLevel,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    #[default]
    Warn,
    /// Error level logging
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // System SCORE reads
    /// getStake of an account
    #[command(name = "stake")]
    Stake {
        /// Account address; taken from --keystore when omitted
        address: Option<String>,
    },

    /// getPRep of an account
    #[command(name = "prep")]
    Prep { address: Option<String> },

    /// getPReps, optionally limited to a ranking range
    #[command(name = "preps")]
    Preps {
        /// First ranking, 0 for the node default
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Last ranking, 0 for the node default
        #[arg(long, default_value_t = 0)]
        end: u64,
    },

    /// getMainPReps
    #[command(name = "mainpreps")]
    MainPReps,

    /// getSubPReps
    #[command(name = "subpreps")]
    SubPReps,

    /// getPRepStats
    #[command(name = "prepStats")]
    PRepStats,

    /// getDelegation of an account
    #[command(name = "delegation")]
    Delegation { address: Option<String> },

    /// queryIScore of an account
    #[command(name = "iscore")]
    IScore { address: Option<String> },

    // System SCORE writes
    /// setStake, amount in loop
    #[command(name = "setStake")]
    SetStake { stake: String },

    /// claimIScore
    #[command(name = "claimIScore")]
    ClaimIScore,

    // Governance SCORE reads
    #[command(name = "getVersion")]
    GetVersion,

    #[command(name = "getRevision")]
    GetRevision,

    #[command(name = "getServiceConfig")]
    GetServiceConfig,

    #[command(name = "getScoreStatus")]
    GetScoreStatus { address: String },

    #[command(name = "getStepPrice")]
    GetStepPrice,

    #[command(name = "getStepCosts")]
    GetStepCosts,

    /// getMaxStepLimit of a context type (invoke or query)
    #[command(name = "getMaxStepLimit")]
    GetMaxStepLimit { context_type: String },

    #[command(name = "isDeployer")]
    IsDeployer { address: String },

    #[command(name = "isInScoreBlackList")]
    IsInScoreBlackList { address: String },

    #[command(name = "isInImportWhiteList")]
    IsInImportWhiteList { import_stmt: String },

    #[command(name = "checkIfAuditEnabled")]
    CheckIfAuditEnabled,

    // Governance SCORE writes
    /// Updates the Governance SCORE from a directory or a .jar file
    #[command(name = "update")]
    Update { score_path: PathBuf },

    #[command(name = "acceptScore")]
    AcceptScore { tx_hash: String },

    #[command(name = "rejectScore")]
    RejectScore { tx_hash: String, reason: String },

    #[command(name = "addAuditor")]
    AddAuditor { address: String },

    #[command(name = "removeAuditor")]
    RemoveAuditor { address: String },

    #[command(name = "setRevision")]
    SetRevision { code: String, name: String },

    /// setStepPrice, price in loop
    #[command(name = "setStepPrice")]
    SetStepPrice { step_price: String },

    /// setStepCost of a step type
    #[command(name = "setStepCost")]
    SetStepCost { step_type: String, cost: String },

    /// setMaxStepLimit of a context type (invoke or query)
    #[command(name = "setMaxStepLimit")]
    SetMaxStepLimit { context_type: String, value: String },

    #[command(name = "addDeployer")]
    AddDeployer { address: String },

    #[command(name = "removeDeployer")]
    RemoveDeployer { address: String },

    #[command(name = "addToScoreBlackList")]
    AddToScoreBlackList { address: String },

    #[command(name = "removeFromScoreBlackList")]
    RemoveFromScoreBlackList { address: String },

    #[command(name = "addImportWhiteList")]
    AddImportWhiteList { import_stmt: String },

    #[command(name = "removeImportWhiteList")]
    RemoveImportWhiteList { import_stmt: String },

    #[command(name = "updateServiceConfig")]
    UpdateServiceConfig { service_flag: String },

    // Any SCORE
    /// icx_getScoreApi of a SCORE
    #[command(name = "getScoreApi")]
    GetScoreApi { address: String },

    /// icx_getTransactionResult of a transaction
    #[command(name = "txresult")]
    TxResult { tx_hash: String },
}

impl Command {
    /// Name of the subcommand as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Stake { .. } => "stake",
            Command::Prep { .. } => "prep",
            Command::Preps { .. } => "preps",
            Command::MainPReps => "mainpreps",
            Command::SubPReps => "subpreps",
            Command::PRepStats => "prepStats",
            Command::Delegation { .. } => "delegation",
            Command::IScore { .. } => "iscore",
            Command::SetStake { .. } => "setStake",
            Command::ClaimIScore => "claimIScore",
            Command::GetVersion => "getVersion",
            Command::GetRevision => "getRevision",
            Command::GetServiceConfig => "getServiceConfig",
            Command::GetScoreStatus { .. } => "getScoreStatus",
            Command::GetStepPrice => "getStepPrice",
            Command::GetStepCosts => "getStepCosts",
            Command::GetMaxStepLimit { .. } => "getMaxStepLimit",
            Command::IsDeployer { .. } => "isDeployer",
            Command::IsInScoreBlackList { .. } => "isInScoreBlackList",
            Command::IsInImportWhiteList { .. } => "isInImportWhiteList",
            Command::CheckIfAuditEnabled => "checkIfAuditEnabled",
            Command::Update { .. } => "update",
            Command::AcceptScore { .. } => "acceptScore",
            Command::RejectScore { .. } => "rejectScore",
            Command::AddAuditor { .. } => "addAuditor",
            Command::RemoveAuditor { .. } => "removeAuditor",
            Command::SetRevision { .. } => "setRevision",
            Command::SetStepPrice { .. } => "setStepPrice",
            Command::SetStepCost { .. } => "setStepCost",
            Command::SetMaxStepLimit { .. } => "setMaxStepLimit",
            Command::AddDeployer { .. } => "addDeployer",
            Command::RemoveDeployer { .. } => "removeDeployer",
            Command::AddToScoreBlackList { .. } => "addToScoreBlackList",
            Command::RemoveFromScoreBlackList { .. } => "removeFromScoreBlackList",
            Command::AddImportWhiteList { .. } => "addImportWhiteList",
            Command::RemoveImportWhiteList { .. } => "removeImportWhiteList",
            Command::UpdateServiceConfig { .. } => "updateServiceConfig",
            Command::GetScoreApi { .. } => "getScoreApi",
            Command::TxResult { .. } => "txresult",
        }
    }
}

/// Parses an integer argument written in decimal or as `0x` hex.
pub fn parse_integer(text: &str) -> Option<BigInt> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    if unsigned.starts_with("0x") {
        return decode_int(text).ok();
    }
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(text.as_bytes(), 10)
}

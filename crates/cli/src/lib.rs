//! # governor CLI
//!
//! Command-line client for the System and Governance SCOREs of an ICON
//! node. Read commands call the SCORE and print the decoded result; write
//! commands build a transaction, ask for confirmation, sign it with the
//! keystore wallet and submit it (or only estimate its steps).

pub mod args;
pub mod commands;
pub mod config;
pub mod console_service;
pub mod printer;

pub use args::{Cli, Command, GlobalArgs, LogLevel};
pub use commands::run;
pub use config::{FileConfig, Settings};

use governor_core::CoreError;
use governor_rpc_client::RpcError;
use governor_wallets::WalletError;
use thiserror::Error;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// An argument or setting was rejected before anything was sent
    #[error("{0}")]
    Validation(String),

    /// The configuration file could not be used
    #[error("Configuration error: {0:#}")]
    Config(#[from] anyhow::Error),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::Validation(message.into())
    }

    /// Process exit code for this error. Usage errors never get here:
    /// clap exits with 2 on its own.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// True when the command was rejected before any request was sent.
    pub fn is_validation(&self) -> bool {
        match self {
            CliError::Validation(_) | CliError::Core(_) => true,
            CliError::Rpc(err) => err.is_validation(),
            _ => false,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

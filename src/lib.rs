//! # governor: ICON System and Governance SCORE client
//!
//! Library facade over the governor crates. The `governor` binary lives in
//! `crates/cli`; this crate re-exports the pieces needed to drive the same
//! SCORE calls from Rust code.
//!
//! ```rust,no_run
//! use governor::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), RpcError> {
//! let client = Arc::new(RpcClient::new("https://ctz.solidwallet.io")?);
//! let governance = GovernanceApi::new(client);
//! let revision = governance.get_revision().await?;
//! println!("{revision}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`] - addresses, hex codec, ICX units and result schemas
//! - [`wallets`] - secp256k1 key wallets and v3 keystores
//! - [`rpc_client`] - JSON-RPC client, transaction builders and SCORE APIs

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use governor_core as core;
pub use governor_rpc_client as rpc_client;
pub use governor_wallets as wallets;

/// Common imports for governor users
pub mod prelude {
    pub use crate::core::{Address, BigInt, GOVERNANCE_SCORE_ADDRESS, SYSTEM_SCORE_ADDRESS};
    pub use crate::rpc_client::{
        AutoConfirm, ContextType, GovernanceApi, IconProvider, InvokeOutcome, Invoker, RpcClient,
        RpcError, StepType, SystemApi,
    };
    pub use crate::wallets::{KeyWallet, Keystore, TransactionSigner};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

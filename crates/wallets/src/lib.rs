//! Governor Wallets Library
//!
//! Key material for signing transactions:
//! - Version 3 JSON keystores (scrypt + AES-128-CTR) with `coinType: icx`
//! - A secp256k1 key wallet producing recoverable signatures
//! - The [`TransactionSigner`] seam the RPC layer signs through

pub mod key_wallet;
pub mod keystore;
pub mod scrypt_parameters;

pub use key_wallet::{KeyWallet, TransactionSigner, WatchOnlyAccount, SIGNATURE_SIZE};
pub use keystore::Keystore;
pub use scrypt_parameters::ScryptParameters;

use governor_core::Address;
use thiserror::Error;

/// Result type for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Keystore file not found: {0}")]
    KeystoreNotFound(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Unsupported keystore crypto: {0}")]
    UnsupportedCrypto(String),

    #[error("Invalid keystore: {0}")]
    InvalidKeystore(String),

    #[error("Keystore address {expected} does not match key address {actual}")]
    AddressMismatch { expected: Address, actual: Address },

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Account {0} is watch-only and cannot sign")]
    WatchOnly(Address),

    #[error("Invalid scrypt parameters: {0}")]
    Scrypt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

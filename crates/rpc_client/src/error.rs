// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// error.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use governor_core::CoreError;
use governor_wallets::WalletError;
use thiserror::Error;

/// Errors that can occur while talking to a node.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The node answered with a JSON-RPC error object.
    #[error("Remote error {code}: {message}")]
    Remote { code: i64, message: String },

    /// The request could not be delivered or its body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with something that is not a valid response.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Invalid parameters.
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Invalid score path: {0}")]
    InvalidDeployPath(String),

    /// The transaction was declined at the confirmation prompt.
    #[error("Transaction cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RpcError {
    /// Create an invalid response error.
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create an invalid params error.
    pub fn invalid_params<S: Into<String>>(message: S) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// True for errors raised before anything was sent to the node.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidParams { .. }
                | Self::InvalidUrl(_)
                | Self::InvalidDeployPath(_)
                | Self::Core(_)
        )
    }
}

/// Result type for RPC operations.
pub type RpcResult<T> = std::result::Result<T, RpcError>;

// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// rpc_response.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{RpcError, RpcResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,

    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default)]
    pub error: Option<RpcResponseError>,
}

/// Error object of a failed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponseError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    /// Returns the result, or the error object as [`RpcError::Remote`].
    pub fn into_result(self) -> RpcResult<Value> {
        if let Some(error) = self.error {
            return Err(RpcError::Remote {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| RpcError::invalid_response("No result returned"))
    }
}

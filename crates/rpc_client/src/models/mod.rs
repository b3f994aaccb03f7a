// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// models/mod.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

mod rpc_request;
mod rpc_response;
mod transaction_result;

pub use rpc_request::RpcRequest;
pub use rpc_response::{RpcResponse, RpcResponseError};
pub use transaction_result::{TransactionFailure, TransactionResult};

// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// lib.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! ICON JSON-RPC v3 client.
//!
//! Transport, transaction building, signing, and typed access to the
//! built-in System and Governance SCOREs.

pub mod builder;
pub mod error;
pub mod governance_api;
pub mod invoker;
pub mod models;
pub mod provider;
pub mod rpc_client;
pub mod serializer;
pub mod system_api;
pub mod transaction;

pub use builder::{
    deploy_content_from_path, Call, CallBuilder, CallParams, CallTransactionBuilder,
    DeployContent, DeployTransactionBuilder,
};
pub use error::{RpcError, RpcResult};
pub use governance_api::{ContextType, GovernanceApi, StepType};
pub use invoker::{AutoConfirm, Confirmation, InvokeOutcome, Invoker};
pub use models::{RpcRequest, RpcResponse, RpcResponseError, TransactionResult};
pub use provider::IconProvider;
pub use rpc_client::{RpcClient, RpcHooks, DEFAULT_TIMEOUT, SEND_TRANSACTION_METHOD};
pub use serializer::{serialize_transaction, tx_hash};
pub use system_api::SystemApi;
pub use transaction::{SignedTransaction, Transaction, TransactionData, TransactionRequest};

// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// rpc_client.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::builder::Call;
use crate::error::{RpcError, RpcResult};
use crate::models::{RpcRequest, RpcResponse, TransactionResult};
use crate::provider::IconProvider;
use crate::transaction::{SignedTransaction, Transaction};
use async_trait::async_trait;
use governor_core::codec::{decode_bytes, decode_int, encode_bytes};
use governor_core::{Address, BigInt};
use reqwest::{Client, Url};
use serde_json::{json, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC method that submits a signed transaction.
pub const SEND_TRANSACTION_METHOD: &str = "icx_sendTransaction";

const API_PATH: &str = "/api/v3";
const DEBUG_API_PATH: &str = "/api/v3d";

pub type RequestObserver = Arc<dyn Fn(&RpcRequest) + Send + Sync>;
pub type ResponseObserver = Arc<dyn Fn(&Value) + Send + Sync>;

/// Observers invoked around every request.
#[derive(Clone, Default)]
pub struct RpcHooks {
    on_request: Option<RequestObserver>,
    on_response: Option<ResponseObserver>,
}

impl RpcHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with each request right before it is sent.
    pub fn on_request(mut self, observer: impl Fn(&RpcRequest) + Send + Sync + 'static) -> Self {
        self.on_request = Some(Arc::new(observer));
        self
    }

    /// Called with each response body that parses as JSON.
    pub fn on_response(mut self, observer: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_response = Some(Arc::new(observer));
        self
    }

    fn notify_request(&self, request: &RpcRequest) {
        if let Some(observer) = &self.on_request {
            observer(request);
        }
    }

    fn notify_response(&self, response: &Value) {
        if let Some(observer) = &self.on_response {
            observer(response);
        }
    }
}

impl fmt::Debug for RpcHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcHooks")
            .field("on_request", &self.on_request.is_some())
            .field("on_response", &self.on_response.is_some())
            .finish()
    }
}

/// JSON-RPC v3 client of an ICON node.
pub struct RpcClient {
    api_address: Url,
    debug_address: Url,
    http_client: Client,
    hooks: RpcHooks,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a client for the node at `url` (scheme, host and optional
    /// port; any path is replaced by the API path).
    pub fn new(url: &str) -> RpcResult<Self> {
        Self::with_config(url, DEFAULT_TIMEOUT, RpcHooks::default())
    }

    pub fn with_config(url: &str, timeout: Duration, hooks: RpcHooks) -> RpcResult<Self> {
        let base = Url::parse(url).map_err(|e| RpcError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") || base.host_str().is_none() {
            return Err(RpcError::InvalidUrl(url.to_string()));
        }
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| RpcError::InvalidUrl(format!("{url}: {e}")))
        };

        Ok(Self {
            api_address: join(API_PATH)?,
            debug_address: join(DEBUG_API_PATH)?,
            http_client: Client::builder().timeout(timeout).build()?,
            hooks,
            next_id: AtomicU64::new(1),
        })
    }

    /// Endpoint of the regular API.
    pub fn api_address(&self) -> &Url {
        &self.api_address
    }

    pub fn debug_address(&self) -> &Url {
        &self.debug_address
    }

    fn as_rpc_request(&self, method: &str, params: Option<Value>) -> RpcRequest {
        RpcRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed), method, params)
    }

    /// Sends `request` to `endpoint` and returns the `result` member.
    pub async fn send_async(&self, endpoint: &Url, request: RpcRequest) -> RpcResult<Value> {
        let start = Instant::now();
        debug!(method = %request.method, id = request.id, url = %endpoint, "sending rpc request");
        self.hooks.notify_request(&request);

        let response = self
            .http_client
            .post(endpoint.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let content = response.text().await?;

        // Nodes report JSON-RPC errors with non-2xx statuses, so the body is
        // parsed whatever the status.
        let raw: Value = serde_json::from_str(&content).map_err(|e| {
            if status.is_success() {
                RpcError::invalid_response(format!("Parse error: {e}"))
            } else {
                RpcError::invalid_response(format!("HTTP {status}: {content}"))
            }
        })?;
        self.hooks.notify_response(&raw);

        let response: RpcResponse = serde_json::from_value(raw)?;
        let result = response.into_result();
        debug!(
            method = %request.method,
            elapsed_ms = start.elapsed().as_millis() as u64,
            success = result.is_ok(),
            "rpc request finished"
        );
        result
    }

    /// Sends a request to the regular API.
    pub async fn rpc_send_async(&self, method: &str, params: Option<Value>) -> RpcResult<Value> {
        let request = self.as_rpc_request(method, params);
        self.send_async(&self.api_address, request).await
    }
}

fn token_as_string<'a>(token: &'a Value, method: &str) -> RpcResult<&'a str> {
    token
        .as_str()
        .ok_or_else(|| RpcError::invalid_response(format!("{method} returned a non-string result")))
}

#[async_trait]
impl IconProvider for RpcClient {
    async fn call(&self, call: &Call) -> RpcResult<Value> {
        self.rpc_send_async("icx_call", Some(call.to_json())).await
    }

    async fn send_transaction(&self, transaction: &SignedTransaction) -> RpcResult<[u8; 32]> {
        let method = SEND_TRANSACTION_METHOD;
        let result = self
            .rpc_send_async(method, Some(Value::Object(transaction.to_json())))
            .await?;

        let bytes = decode_bytes(token_as_string(&result, method)?)?;
        let hash: [u8; 32] = bytes
            .try_into()
            .map_err(|_| RpcError::invalid_response(format!("{method} returned a malformed hash")))?;
        info!(tx_hash = %encode_bytes(&hash), "transaction submitted");
        Ok(hash)
    }

    async fn estimate_step(&self, transaction: &Transaction) -> RpcResult<BigInt> {
        let method = "debug_estimateStep";
        let request = self.as_rpc_request(method, Some(Value::Object(transaction.to_json())));
        let result = self.send_async(&self.debug_address, request).await?;
        Ok(decode_int(token_as_string(&result, method)?)?)
    }

    async fn get_transaction_result(&self, tx_hash: &[u8; 32]) -> RpcResult<TransactionResult> {
        let params = json!({"txHash": encode_bytes(tx_hash)});
        let result = self
            .rpc_send_async("icx_getTransactionResult", Some(params))
            .await?;
        TransactionResult::from_json(result)
    }

    async fn get_score_api(&self, address: &Address) -> RpcResult<Value> {
        let params = json!({"address": address.to_string()});
        self.rpc_send_async("icx_getScoreApi", Some(params)).await
    }
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("api_address", &self.api_address.as_str())
            .field("hooks", &self.hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_replace_the_path() {
        let client = RpcClient::new("https://ctz.solidwallet.io/some/path?x=1").unwrap();
        assert_eq!(client.api_address().as_str(), "https://ctz.solidwallet.io/api/v3");
        assert_eq!(
            client.debug_address().as_str(),
            "https://ctz.solidwallet.io/api/v3d"
        );

        let local = RpcClient::new("http://localhost:9000").unwrap();
        assert_eq!(local.api_address().as_str(), "http://localhost:9000/api/v3");
    }

    #[test]
    fn rejects_unusable_urls() {
        for url in ["localhost:9000", "ftp://example.com", "not a url"] {
            assert!(
                matches!(RpcClient::new(url), Err(RpcError::InvalidUrl(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn request_ids_increase() {
        let client = RpcClient::new("http://localhost:9000").unwrap();
        let first = client.as_rpc_request("icx_call", None);
        let second = client.as_rpc_request("icx_call", None);
        assert!(second.id > first.id);
    }
}

// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// builder.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Builders for read calls and transactions.

use crate::error::{RpcError, RpcResult};
use crate::transaction::{TransactionData, TransactionRequest};
use governor_core::codec::{encode_bytes, encode_int};
use governor_core::{Address, BigInt, ZERO_ADDRESS};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Content type of zipped Python SCOREs.
pub const CONTENT_TYPE_ZIP: &str = "application/zip";
/// Content type of Java SCOREs.
pub const CONTENT_TYPE_JAVA: &str = "application/java";

const PACKAGE_JSON: &str = "package.json";

/// SCORE method parameters. Every value travels as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParams(IndexMap<String, String>);

impl CallParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_int(self, key: impl Into<String>, value: &BigInt) -> Self {
        self.with_str(key, encode_int(value))
    }

    pub fn with_address(self, key: impl Into<String>, address: &Address) -> Self {
        self.with_str(key, address.to_string())
    }

    pub fn with_bytes(self, key: impl Into<String>, bytes: &[u8]) -> Self {
        self.with_str(key, encode_bytes(bytes))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), json!(value)))
                .collect(),
        )
    }
}

/// A read-only SCORE call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub from: Address,
    pub to: Address,
    pub method: String,
    pub params: Option<CallParams>,
}

impl Call {
    /// `icx_call` params.
    pub fn to_json(&self) -> Value {
        let mut data = Map::new();
        data.insert("method".to_string(), json!(self.method));
        if let Some(params) = self.params.as_ref().filter(|params| !params.is_empty()) {
            data.insert("params".to_string(), params.to_json());
        }

        json!({
            "from": self.from.to_string(),
            "to": self.to.to_string(),
            "dataType": "call",
            "data": data,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallBuilder {
    from: Option<Address>,
    to: Option<Address>,
    method: Option<String>,
    params: Option<CallParams>,
}

impl CallBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender of the call, the zero address when not set.
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn params(mut self, params: CallParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> RpcResult<Call> {
        Ok(Call {
            from: self.from.unwrap_or(ZERO_ADDRESS),
            to: self
                .to
                .ok_or_else(|| RpcError::invalid_params("call has no target address"))?,
            method: self
                .method
                .ok_or_else(|| RpcError::invalid_params("call has no method"))?,
            params: self.params,
        })
    }
}

/// Builds a transaction invoking a SCORE method.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTransactionBuilder {
    to: Address,
    method: String,
    params: Option<CallParams>,
}

impl CallTransactionBuilder {
    pub fn new(to: Address, method: impl Into<String>) -> Self {
        Self {
            to,
            method: method.into(),
            params: None,
        }
    }

    pub fn params(mut self, params: CallParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn build(self) -> TransactionRequest {
        TransactionRequest {
            to: self.to,
            value: None,
            data: TransactionData::Call {
                method: self.method,
                params: self.params,
            },
        }
    }
}

impl From<CallTransactionBuilder> for TransactionRequest {
    fn from(builder: CallTransactionBuilder) -> Self {
        builder.build()
    }
}

/// Builds a transaction deploying SCORE code.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployTransactionBuilder {
    to: Address,
    content: DeployContent,
    params: Option<CallParams>,
}

impl DeployTransactionBuilder {
    pub fn new(to: Address, content: DeployContent) -> Self {
        Self {
            to,
            content,
            params: None,
        }
    }

    /// Parameters handed to the SCORE's install or update hook.
    pub fn params(mut self, params: CallParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> TransactionRequest {
        TransactionRequest {
            to: self.to,
            value: None,
            data: TransactionData::Deploy {
                content: self.content,
                params: self.params,
            },
        }
    }
}

impl From<DeployTransactionBuilder> for TransactionRequest {
    fn from(builder: DeployTransactionBuilder) -> Self {
        builder.build()
    }
}

/// SCORE code ready to be deployed.
#[derive(Clone, PartialEq, Eq)]
pub struct DeployContent {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DeployContent {
    pub fn to_hex(&self) -> String {
        encode_bytes(&self.bytes)
    }
}

impl std::fmt::Debug for DeployContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployContent")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Loads SCORE code from `path`.
///
/// A directory must hold a `package.json` and is zipped; a `.jar` file is
/// taken as-is. Anything else is rejected.
pub fn deploy_content_from_path(path: impl AsRef<Path>) -> RpcResult<DeployContent> {
    let path = path.as_ref();

    if path.is_dir() {
        if !path.join(PACKAGE_JSON).is_file() {
            return Err(RpcError::InvalidDeployPath(format!(
                "{} has no {PACKAGE_JSON}",
                path.display()
            )));
        }
        let bytes = zip_directory(path)?;
        debug!(path = %path.display(), size = bytes.len(), "zipped score directory");
        return Ok(DeployContent {
            content_type: CONTENT_TYPE_ZIP,
            bytes,
        });
    }

    let is_jar = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("jar"));
    if path.is_file() && is_jar {
        return Ok(DeployContent {
            content_type: CONTENT_TYPE_JAVA,
            bytes: std::fs::read(path)?,
        });
    }

    Err(RpcError::InvalidDeployPath(path.display().to_string()))
}

fn zip_directory(root: &Path) -> RpcResult<Vec<u8>> {
    let prefix = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "score".to_string());

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    add_directory(&mut writer, options, root, &prefix)?;
    Ok(writer.finish()?.into_inner())
}

fn add_directory(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    dir: &Path,
    prefix: &str,
) -> RpcResult<()> {
    writer.add_directory(format!("{prefix}/"), options)?;

    let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name == "__pycache__" {
            continue;
        }

        let entry_path = entry.path();
        let entry_name = format!("{prefix}/{name}");
        if entry_path.is_dir() {
            add_directory(writer, options, &entry_path, &entry_name)?;
        } else {
            writer.start_file(entry_name, options)?;
            writer.write_all(&std::fs::read(&entry_path)?)?;
        }
    }
    Ok(())
}

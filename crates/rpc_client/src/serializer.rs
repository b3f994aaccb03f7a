// Copyright (C) 2019-2025 The ICON Governor Authors.
//
// serializer.rs file belongs to the governor project and is free
// software distributed under the Apache License 2.0, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.apache.org/licenses/LICENSE-2.0
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Canonical transaction serialization.
//!
//! The string that gets hashed and signed is `icx_sendTransaction.`
//! followed by the transaction's fields as `key.value` pairs sorted by key
//! and joined with `.`. Nested objects render as `{k.v.k.v}`, arrays as
//! `[a.b]` and null as `\0`. The characters `\ . { } [ ]` inside values are
//! escaped with a backslash. The `signature` field never takes part.

use serde_json::{Map, Value};
use sha3::{Digest, Sha3_256};

const PREFIX: &str = "icx_sendTransaction";
const SIGNATURE_FIELD: &str = "signature";

/// Serializes transaction params for hashing.
pub fn serialize_transaction(params: &Map<String, Value>) -> String {
    let mut out = String::from(PREFIX);
    let body = serialize_object_body(params, Some(SIGNATURE_FIELD));
    if !body.is_empty() {
        out.push('.');
        out.push_str(&body);
    }
    out
}

/// SHA3-256 of [`serialize_transaction`].
pub fn tx_hash(params: &Map<String, Value>) -> [u8; 32] {
    Sha3_256::digest(serialize_transaction(params).as_bytes()).into()
}

fn serialize_object_body(object: &Map<String, Value>, skip: Option<&str>) -> String {
    let mut keys: Vec<&String> = object
        .keys()
        .filter(|key| Some(key.as_str()) != skip)
        .collect();
    keys.sort();

    keys.into_iter()
        .map(|key| format!("{}.{}", key, serialize_value(&object[key])))
        .collect::<Vec<_>>()
        .join(".")
}

fn serialize_value(value: &Value) -> String {
    match value {
        Value::Null => "\\0".to_string(),
        Value::String(text) => escape(text),
        Value::Object(object) => format!("{{{}}}", serialize_object_body(object, None)),
        Value::Array(items) => format!(
            "[{}]",
            items
                .iter()
                .map(serialize_value)
                .collect::<Vec<_>>()
                .join(".")
        ),
        Value::Bool(_) | Value::Number(_) => escape(&value.to_string()),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '.' | '{' | '}' | '[' | ']') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

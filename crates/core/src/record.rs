//! Typed result records decoded from raw JSON-RPC results.

use crate::address::Address;
use crate::codec::{decode_bool, decode_bytes, decode_int, encode_bytes};
use crate::error::{CoreError, Result};
use crate::schema::{FieldType, Schema};
use crate::units::loop_to_str;
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::fmt;

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(BigInt),
    /// Amount in loop, displayed as ICX.
    Icx(BigInt),
    Bool(bool),
    Address(Address),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Record(ResultRecord),
    /// A field the schema does not describe, kept as received.
    Raw(serde_json::Value),
}

impl Value {
    /// Returns the integer behind `Int` and `Icx` values.
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(value) | Value::Icx(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ResultRecord> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Icx(value) => write!(f, "{} ICX", loop_to_str(value)),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Address(address) => write!(f, "{address}"),
            Value::Str(text) => f.write_str(text),
            Value::Bytes(bytes) => f.write_str(&encode_bytes(bytes)),
            Value::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Record(record) => write!(f, "{record}"),
            Value::Raw(json) => write!(f, "{json}"),
        }
    }
}

/// Insertion-ordered map from field name to decoded value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    fields: IndexMap<String, Value>,
}

impl ResultRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Decodes a JSON object into a record following `schema`.
///
/// Named fields decode by their rule, unnamed ones pass through as
/// [`Value::Raw`], missing ones are skipped.
pub fn decode_record(schema: &Schema, json: &serde_json::Value) -> Result<ResultRecord> {
    decode_record_at(schema, json, schema.name)
}

fn decode_record_at(schema: &Schema, json: &serde_json::Value, path: &str) -> Result<ResultRecord> {
    let object = json.as_object().ok_or_else(|| CoreError::UnexpectedShape {
        field: path.to_string(),
        expected: "object",
    })?;

    let mut record = ResultRecord::new();
    for (name, raw) in object {
        let value = match schema.field(name) {
            Some(ty) => decode_value(ty, &format!("{path}.{name}"), raw)?,
            None => Value::Raw(raw.clone()),
        };
        record.insert(name.clone(), value);
    }
    Ok(record)
}

/// Decodes one JSON value by its rule; `field` names it in errors.
pub fn decode_value(ty: FieldType, field: &str, json: &serde_json::Value) -> Result<Value> {
    let text = || {
        json.as_str().ok_or_else(|| CoreError::UnexpectedShape {
            field: field.to_string(),
            expected: "string",
        })
    };

    Ok(match ty {
        FieldType::Int => Value::Int(decode_int(text()?)?),
        FieldType::Icx => Value::Icx(decode_int(text()?)?),
        FieldType::Bool => Value::Bool(decode_bool(text()?)?),
        FieldType::Address => Value::Address(text()?.parse()?),
        FieldType::Str => Value::Str(text()?.to_string()),
        FieldType::Bytes => Value::Bytes(decode_bytes(text()?)?),
        FieldType::List(inner) => {
            let items = json.as_array().ok_or_else(|| CoreError::UnexpectedShape {
                field: field.to_string(),
                expected: "array",
            })?;
            let decoded = items
                .iter()
                .enumerate()
                .map(|(index, item)| decode_value(*inner, &format!("{field}[{index}]"), item))
                .collect::<Result<Vec<_>>>()?;
            Value::List(decoded)
        }
        FieldType::Record(schema) => Value::Record(decode_record_at(schema, json, field)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GET_DELEGATION, GET_STAKE, QUERY_ISCORE};
    use serde_json::json;

    #[test]
    fn decodes_stake_with_unstakes() {
        let record = decode_record(
            &GET_STAKE,
            &json!({
                "stake": "0xde0b6b3a7640000",
                "unstakes": [
                    {"unstake": "0x1", "unstakeBlockHeight": "0x10", "remainingBlocks": "0x2"}
                ]
            }),
        )
        .unwrap();

        assert_eq!(record.get("stake").unwrap().to_string(), "1 ICX");
        let unstakes = record.get("unstakes").unwrap().as_list().unwrap();
        let first = unstakes[0].as_record().unwrap();
        assert_eq!(
            first.get("unstakeBlockHeight"),
            Some(&Value::Int(BigInt::from(16)))
        );
    }

    #[test]
    fn keeps_unknown_fields_raw_and_in_order() {
        let record = decode_record(
            &QUERY_ISCORE,
            &json!({"blockHeight": "0x5", "extra": 7, "iscore": "0x3e8"}),
        )
        .unwrap();

        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["blockHeight", "extra", "iscore"]);
        assert_eq!(record.get("extra"), Some(&Value::Raw(json!(7))));
    }

    #[test]
    fn missing_prefix_fails_decoding() {
        let err = decode_record(&GET_STAKE, &json!({"stake": "100"})).unwrap_err();
        assert_eq!(err, CoreError::MissingHexPrefix("100".to_string()));
    }

    #[test]
    fn wrong_shape_names_the_field() {
        let err = decode_record(&GET_DELEGATION, &json!({"delegations": "0x1"})).unwrap_err();
        assert_eq!(
            err,
            CoreError::UnexpectedShape {
                field: "getDelegation.delegations".to_string(),
                expected: "array",
            }
        );
    }
}

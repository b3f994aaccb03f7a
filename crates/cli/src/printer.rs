//! Console output of requests, responses and decoded results.

use crate::commands::ResultKind;
use crate::Result;
use governor_core::codec::encode_int;
use governor_core::schema::FieldType;
use governor_core::{decode_record, decode_value, ResultRecord, Value};
use governor_rpc_client::{RpcHooks, RpcRequest, SEND_TRANSACTION_METHOD};
use std::fmt::Write;

/// Width titles are padded to.
pub const COLUMN: usize = 80;

const INDENT: &str = "  ";

/// `[title]` padded with `-` to [`COLUMN`] characters.
pub fn format_title(title: &str) -> String {
    format!("{:-<width$}", format!("[{title}]"), width = COLUMN)
}

pub fn print_title(title: &str) {
    println!("{}", format_title(title));
}

/// Prints a JSON document under a title, followed by a blank line.
pub fn print_json(title: &str, json: &serde_json::Value) {
    print_title(title);
    match serde_json::to_string_pretty(json) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{json}"),
    }
    println!();
}

/// Hooks that echo requests and raw responses to stdout.
///
/// Submissions are left out: the confirmation step already showed them.
pub fn console_hooks() -> RpcHooks {
    RpcHooks::new()
        .on_request(|request: &RpcRequest| {
            if echoes_request(request) {
                match serde_json::to_value(request) {
                    Ok(json) => print_json("Request", &json),
                    Err(err) => tracing::warn!(error = %err, "cannot render request"),
                }
            }
        })
        .on_response(|response: &serde_json::Value| print_json("Response", response))
}

fn echoes_request(request: &RpcRequest) -> bool {
    request.method != SEND_TRANSACTION_METHOD
}

/// Decodes a raw result the way `kind` describes and renders it.
pub fn format_result(kind: ResultKind, name: &str, json: &serde_json::Value) -> Result<String> {
    let scalar = |ty: FieldType| decode_value(ty, name, json);

    let text = match kind {
        ResultKind::Record(schema) => format_record(&decode_record(schema, json)?),
        ResultKind::Int => match scalar(FieldType::Int)? {
            Value::Int(value) => format!("{value} ({})", encode_int(&value)),
            other => other.to_string(),
        },
        ResultKind::Icx => scalar(FieldType::Icx)?.to_string(),
        ResultKind::Bool => format!("{name}: {}", scalar(FieldType::Bool)?),
        ResultKind::Str => scalar(FieldType::Str)?.to_string(),
        ResultKind::IntMap => format_int_map(name, json)?,
        ResultKind::Raw => {
            serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string())
        }
    };
    Ok(text)
}

/// Prints a decoded result under the `Result` title.
pub fn print_result(kind: ResultKind, name: &str, json: &serde_json::Value) -> Result<()> {
    let text = format_result(kind, name, json)?;
    print_title("Result");
    println!("{}", text.trim_end());
    Ok(())
}

/// Renders a record as `key: value` lines, nesting two spaces per level.
pub fn format_record(record: &ResultRecord) -> String {
    let mut out = String::new();
    write_record(&mut out, 0, record);
    out
}

fn format_int_map(name: &str, json: &serde_json::Value) -> Result<String> {
    let mut record = ResultRecord::new();
    if let Some(object) = json.as_object() {
        for (key, raw) in object {
            record.insert(key.clone(), decode_value(FieldType::Int, &format!("{name}.{key}"), raw)?);
        }
    } else {
        return Ok(decode_value(FieldType::Int, name, json)?.to_string());
    }
    Ok(format_record(&record))
}

fn write_record(out: &mut String, depth: usize, record: &ResultRecord) {
    for (name, value) in record.iter() {
        write_field(out, depth, name, value);
    }
}

fn write_field(out: &mut String, depth: usize, name: &str, value: &Value) {
    let pad = INDENT.repeat(depth);
    match value {
        Value::Record(record) => {
            let _ = writeln!(out, "{pad}{name}:");
            write_record(out, depth + 1, record);
        }
        Value::List(items) if !items.is_empty() => {
            let _ = writeln!(out, "{pad}{name}:");
            for item in items {
                write_item(out, depth + 1, item);
            }
        }
        _ => {
            let _ = writeln!(out, "{pad}{name}: {value}");
        }
    }
}

fn write_item(out: &mut String, depth: usize, item: &Value) {
    let pad = INDENT.repeat(depth);
    match item {
        Value::Record(record) => {
            let _ = writeln!(out, "{pad}-");
            write_record(out, depth + 1, record);
        }
        Value::List(items) => {
            let _ = writeln!(out, "{pad}-");
            for inner in items {
                write_item(out, depth + 1, inner);
            }
        }
        scalar => {
            let _ = writeln!(out, "{pad}- {scalar}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governor_core::schema::{GET_REVISION, GET_STAKE};
    use serde_json::json;

    #[test]
    fn test_title_is_padded_to_column() {
        let title = format_title("Request");
        assert_eq!(title.len(), COLUMN);
        assert!(title.starts_with("[Request]---"));
    }

    #[test]
    fn test_submissions_are_not_echoed() {
        assert!(echoes_request(&RpcRequest::new(1, "icx_call", None)));
        assert!(echoes_request(&RpcRequest::new(2, "debug_estimateStep", None)));
        assert!(!echoes_request(&RpcRequest::new(3, SEND_TRANSACTION_METHOD, None)));
    }

    #[test]
    fn test_stake_renders_icx() {
        let text =
            format_result(ResultKind::Record(&GET_STAKE), "stake", &json!({"stake": "0x1"}))
                .unwrap();
        assert_eq!(text, "stake: 0.000000000000000001 ICX\n");
    }

    #[test]
    fn test_nested_lists_are_indented() {
        let text = format_result(
            ResultKind::Record(&GET_STAKE),
            "stake",
            &json!({
                "stake": "0xde0b6b3a7640000",
                "unstakes": [{"unstake": "0x2", "unstakeBlockHeight": "0xa"}]
            }),
        )
        .unwrap();
        assert_eq!(
            text,
            "stake: 1 ICX\nunstakes:\n  -\n    unstake: 0.000000000000000002 ICX\n    unstakeBlockHeight: 10\n"
        );
    }

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(
            format_result(ResultKind::Int, "getMaxStepLimit", &json!("0x9502f900")).unwrap(),
            "2500000000 (0x9502f900)"
        );
        assert_eq!(
            format_result(ResultKind::Icx, "getStepPrice", &json!("0x2e90edd00")).unwrap(),
            "0.0000000125 ICX"
        );
        assert_eq!(
            format_result(ResultKind::Bool, "isDeployer", &json!("0x1")).unwrap(),
            "isDeployer: true"
        );
        assert_eq!(
            format_result(ResultKind::Str, "getVersion", &json!("1.2.3")).unwrap(),
            "1.2.3"
        );
    }

    #[test]
    fn test_int_map() {
        let text = format_result(
            ResultKind::IntMap,
            "getStepCosts",
            &json!({"default": "0x186a0", "apiCall": "0x2710"}),
        )
        .unwrap();
        assert_eq!(text, "default: 100000\napiCall: 10000\n");
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let text = format_result(
            ResultKind::Record(&GET_REVISION),
            "getRevision",
            &json!({"code": "0x11", "name": "1.8.0", "extra": true}),
        )
        .unwrap();
        assert_eq!(text, "code: 17\nname: 1.8.0\nextra: true\n");
    }

    #[test]
    fn test_malformed_result_is_an_error() {
        assert!(format_result(ResultKind::Int, "getMaxStepLimit", &json!("100")).is_err());
    }
}

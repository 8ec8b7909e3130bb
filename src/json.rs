//! Deterministic JSON rendering.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::error::ApprovalError;

/// Indentation used for approved JSON.
const INDENT: &[u8] = b"    ";

/// Renders `value` as pretty JSON with recursively sorted object keys.
///
/// Non-ASCII characters are written as `\uXXXX` escapes (surrogate pairs
/// above U+FFFF), so approved JSON is always plain ASCII.
///
/// Keys are sorted explicitly rather than relying on the map type behind
/// `serde_json::Value`, so the output is identical whether or not
/// `serde_json/preserve_order` is enabled elsewhere in the build.
///
/// # Errors
///
/// Returns [`ApprovalError::Serialization`] if `value` cannot be
/// represented as JSON (for example a map with non-string keys).
///
/// # Examples
///
///     use std::collections::HashMap;
///
///     let value = HashMap::from([("b", 1), ("a", 2)]);
///     let json = approvals::to_json(&value).unwrap();
///     assert_eq!(json, "{\n    \"a\": 2,\n    \"b\": 1\n}");
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApprovalError> {
    let tree = serde_json::to_value(value).map_err(serialization_error)?;
    let sorted = sort_keys(tree);

    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    sorted
        .serialize(&mut serializer)
        .map_err(serialization_error)?;
    let json = String::from_utf8(out).map_err(|error| ApprovalError::Serialization {
        message: error.to_string(),
    })?;
    Ok(escape_non_ascii(&json))
}

// serde_json emits only ASCII outside string literals, so every non-ASCII
// character here belongs to a key or a string value.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut buffer = [0_u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
            continue;
        }
        for unit in c.encode_utf16(&mut buffer).iter() {
            escaped.push_str(&format!("\\u{unit:04x}"));
        }
    }
    escaped
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, nested)| (key, sort_keys(nested)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}

fn serialization_error(error: serde_json::Error) -> ApprovalError {
    ApprovalError::Serialization {
        message: error.to_string(),
    }
}

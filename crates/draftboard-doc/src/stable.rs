//! Deterministic JSON serialization with sorted object keys.
//!
//! Two values that are structurally equal always stringify to the same
//! bytes, regardless of the order their object keys were inserted in. That
//! makes the output usable as a cheap equality token: compare the strings
//! and you have compared the values.

use serde_json::Value;
use std::fmt::Write as _;

/// Serialize `value` to a deterministic JSON string with sorted object keys.
///
/// # Example
///
/// ```
/// use draftboard_doc::stringify;
///
/// let a = serde_json::json!({"b": 2, "a": 1});
/// let b = serde_json::json!({"a": 1, "b": 2});
/// assert_eq!(stringify(&a), stringify(&b));
/// assert_eq!(stringify(&a), r#"{"a":1,"b":2}"#);
/// ```
pub fn stringify(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            out.push_str(if *b { "true" } else { "false" });
        }
        Value::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(|key| key.as_str()).collect();
            keys.sort_unstable();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, &map[*key]);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

//! Section content => JSX attribute text.
//!
//! strings            => key="..."   (backslash and quote escaped)
//! numbers, booleans  => key={42}
//! null               => key={null}
//! arrays, objects    => key={<compact JSON>}

use crate::error::GenerateError;
use serde_json::{Map, Value};

/// Serialize `content` into space-separated attributes, in input key order.
pub fn render_attributes(
    section_id: &str,
    content: &Map<String, Value>,
) -> Result<String, GenerateError> {
    let mut parts = Vec::with_capacity(content.len());
    for (key, value) in content {
        if !is_attribute_name(key) {
            return Err(GenerateError::InvalidAttribute {
                section: section_id.to_string(),
                key: key.clone(),
            });
        }
        parts.push(format!("{}={}", key, render_value(value)));
    }
    Ok(parts.join(" "))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", escape(s)),
        Value::Number(n) => format!("{{{}}}", n),
        Value::Bool(b) => format!("{{{}}}", b),
        Value::Null => "{null}".to_string(),
        // Value's Display is the compact JSON encoding.
        Value::Array(_) | Value::Object(_) => format!("{{{}}}", value),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn is_attribute_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

//! Primitive formatting for the display panels.

use serde_json::Value as JsonValue;

use crate::number::render_number;

/// Renders a value as it appears after `"key": ` in a display line.
///
/// Strings are quoted with control characters escaped; containers collapse
/// onto a single line.
///
/// ```
/// # use tapose_core::value::render_value;
/// # use serde_json::json;
/// assert_eq!(render_value(&json!("a\tb")), "\"a\\tb\"");
/// assert_eq!(render_value(&json!(null)), "null");
/// assert_eq!(render_value(&json!({"a": 1, "b": [1, 2]})), "{ \"a\": 1, \"b\": [ 1, 2 ] }");
/// ```
#[must_use]
pub fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => quote_display(s),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            let mut out = String::new();
            write_inline(&mut out, value);
            out
        }
        _ => render_scalar(value),
    }
}

/// Renders an object key or array index in quoted form.
#[must_use]
pub fn render_key(key: &str) -> String {
    quote_display(key)
}

/// Two spaces per nesting level.
#[must_use]
pub fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn render_scalar(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => render_number(n),
        JsonValue::String(s) => quote_json(s),
        JsonValue::Array(_) | JsonValue::Object(_) => render_value(value),
    }
}

// Only the escapes that would break a single display line; quotes are left
// as they are.
fn quote_display(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn quote_json(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| quote_display(s))
}

// Matches a two-space pretty print with every line trimmed and joined by a
// single space.
fn write_inline(out: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Array(items) if items.is_empty() => out.push_str("[]"),
        JsonValue::Object(map) if map.is_empty() => out.push_str("{}"),
        JsonValue::Array(items) => {
            out.push_str("[ ");
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_inline(out, item);
            }
            out.push_str(" ]");
        }
        JsonValue::Object(map) => {
            out.push_str("{ ");
            for (idx, (key, item)) in map.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                out.push_str(&quote_json(key));
                out.push_str(": ");
                write_inline(out, item);
            }
            out.push_str(" }");
        }
        scalar => out.push_str(&render_scalar(scalar)),
    }
}

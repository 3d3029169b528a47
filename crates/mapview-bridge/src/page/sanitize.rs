//! Encoding of values embedded in the page's inline script.

use serde_json::Value;

/// Serialize `value` as a JSON literal that is safe inside `<script>`.
///
/// `<` is escaped so no `</script>` or `<!--` sequence can appear, and the
/// line separators U+2028/U+2029 are escaped for older JS parsers.
pub fn script_json(value: &Value) -> String {
    let mut out = String::new();
    for ch in value.to_string().chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Parse a map style string into a JSON array.
///
/// Empty, invalid and non-array styles fall back to `[]`.
pub fn style_json(style: &str) -> Value {
    if style.trim().is_empty() {
        return Value::Array(Vec::new());
    }
    match serde_json::from_str::<Value>(style) {
        Ok(styles @ Value::Array(_)) => styles,
        Ok(_) => {
            tracing::warn!("Map style is not a JSON array, using default style");
            Value::Array(Vec::new())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Map style is not valid JSON, using default style");
            Value::Array(Vec::new())
        }
    }
}

//! Shared range-validation helpers.

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    errors.extend(range_error(name, value, min, max));
}

/// Push an error if `value` is outside `[min, max]` or not finite (float).
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    errors.extend(range_error_f64(name, value, min, max));
}

pub(crate) fn range_error(name: &str, value: u32, min: u32, max: u32) -> Option<String> {
    (value < min || value > max).then(|| format!("{name} = {value} is out of range [{min}, {max}]"))
}

pub(crate) fn range_error_f64(name: &str, value: f64, min: f64, max: f64) -> Option<String> {
    (!value.is_finite() || value < min || value > max)
        .then(|| format!("{name} = {value} is out of range [{min}, {max}]"))
}

/// Why `style` is not a usable map style, if it isn't.
pub(crate) fn style_error(style: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(style) {
        Ok(serde_json::Value::Array(_)) => None,
        Ok(_) => Some("map.style must be a JSON array".into()),
        Err(e) => Some(format!("map.style is not valid JSON: {e}")),
    }
}

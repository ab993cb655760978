//! Normalization of loosely typed table cells.
//!
//! The same logical value may arrive as a JSON number or a string depending
//! on the backend column type (`STATUS` is `CHAR` in one deployment and
//! `TINYINT` in another, and a boolean column elsewhere), so comparisons go
//! through these helpers.

use serde_json::Value;

/// Render a cell as text for label comparison.
///
/// Integral numbers render without a fractional part, so `1`, `1.0` and
/// `"1"` all read as `"1"`. Booleans read as `"1"` and `"0"`. `NULL` reads
/// as `None`.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 && f.abs() < 1e15 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Convert a cell to a PnL figure.
///
/// Numbers pass through, numeric strings are parsed after trimming, and
/// `NULL` counts as zero. Returns `None` for anything that is not a number.
pub fn cell_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

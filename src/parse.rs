//! Scalar parsers for single-field dialect conversions
//!
//! Each parser takes one value pulled out of a source document and
//! returns the converted value, or `None` when the conversion does not
//! apply. Malformed input is a normal case here, never an error: a
//! parser that cannot make sense of its input reports `None` and the
//! interpreter omits the field. In particular the date parsers never
//! substitute the current time for an unparseable timestamp.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

/// Canonical timestamp form used for structured dates in documents.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Python-style truthiness over JSON values.
///
/// Builders and the interpreter treat null, false, zero, empty strings
/// and empty containers as "nothing to report".
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(obj) => !obj.is_empty(),
    }
}

/// Best-effort string form of a scalar. Containers fall back to their
/// JSON text so nothing is silently dropped.
pub(crate) fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Parse a timestamp string into the canonical structured date form.
///
/// Accepted formats, tried in order against the substring before the
/// first `.`: `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD`, `MM/DD/YYYY`. The
/// first match wins; date-only formats resolve to midnight. A value
/// already in canonical form passes through unchanged.
pub fn parse_date(value: &Value) -> Option<Value> {
    let raw = value.as_str()?;
    let head = raw.split('.').next().unwrap_or(raw);

    if let Ok(dt) = NaiveDateTime::parse_from_str(head, ISO_FORMAT) {
        return Some(json!(dt.format(ISO_FORMAT).to_string()));
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(head, fmt) {
            let dt = date.and_hms_opt(0, 0, 0)?;
            return Some(json!(dt.format(ISO_FORMAT).to_string()));
        }
    }
    None
}

/// Format a structured date as an ISO-8601 string.
///
/// Strings are assumed already formatted and pass through unchanged;
/// anything else degrades to its string form.
pub fn format_date(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(json!(s)),
        other => Some(json!(scalar_string(other))),
    }
}

/// Split a keyword field into a list of trimmed keywords.
///
/// Strings split on `;` or `,` with empty fragments dropped; lists keep
/// their truthy elements, stringified.
pub fn split_keywords(value: &Value) -> Option<Value> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => {
            let keywords: Vec<String> = s
                .split([';', ','])
                .map(str::trim)
                .filter(|kw| !kw.is_empty())
                .map(String::from)
                .collect();
            Some(json!(keywords))
        }
        Value::Array(arr) => {
            let keywords: Vec<String> = arr
                .iter()
                .filter(|item| is_truthy(item))
                .map(scalar_string)
                .collect();
            Some(json!(keywords))
        }
        _ => None,
    }
}

/// Join a list into a comma-separated string; scalars degrade to their
/// string form.
pub fn join_list(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(arr) => {
            let parts: Vec<String> = arr
                .iter()
                .filter(|item| is_truthy(item))
                .map(scalar_string)
                .collect();
            Some(json!(parts.join(", ")))
        }
        other => Some(json!(scalar_string(other))),
    }
}

/// Size suffixes and their byte multipliers, in match order.
///
/// Matching walks the table in declaration order and takes the first
/// suffix whose numeric prefix parses, so `"1 kb"` skips the bare `b`
/// entry (prefix `"1 k"` is not a number) and lands on `kb`.
const SIZE_UNITS: &[(&str, u64)] = &[
    ("b", 1),
    ("byte", 1),
    ("bytes", 1),
    ("kb", 1 << 10),
    ("kilobyte", 1 << 10),
    ("kilobytes", 1 << 10),
    ("mb", 1 << 20),
    ("megabyte", 1 << 20),
    ("megabytes", 1 << 20),
    ("gb", 1 << 30),
    ("gigabyte", 1 << 30),
    ("gigabytes", 1 << 30),
    ("tb", 1u64 << 40),
    ("terabyte", 1u64 << 40),
    ("terabytes", 1u64 << 40),
];

/// Parse a human-readable size (`"1.5 GB"`, `"2048"`, `1024`) into a
/// byte count.
pub fn parse_size(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n.as_i64().map(|bytes| json!(bytes)),
        Value::String(s) => {
            let size = s.trim().to_lowercase();
            if !size.is_empty() && size.bytes().all(|b| b.is_ascii_digit()) {
                return size.parse::<i64>().ok().map(|bytes| json!(bytes));
            }
            for (unit, multiplier) in SIZE_UNITS {
                if let Some(prefix) = size.strip_suffix(unit) {
                    if let Ok(number) = prefix.trim().parse::<f64>() {
                        return Some(json!((number * *multiplier as f64) as i64));
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// Format a byte count as a human-readable size string with binary
/// prefixes and two decimal places. Strings pass through unchanged.
pub fn format_size(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(json!(s)),
        Value::Number(n) => {
            let bytes = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            let formatted = if bytes >= 1 << 40 {
                format!("{:.2} TB", bytes as f64 / (1u64 << 40) as f64)
            } else if bytes >= 1 << 30 {
                format!("{:.2} GB", bytes as f64 / (1u64 << 30) as f64)
            } else if bytes >= 1 << 20 {
                format!("{:.2} MB", bytes as f64 / (1u64 << 20) as f64)
            } else if bytes >= 1 << 10 {
                format!("{:.2} KB", bytes as f64 / (1u64 << 10) as f64)
            } else {
                format!("{} bytes", bytes)
            };
            Some(json!(formatted))
        }
        _ => None,
    }
}

/// Extract the raw value from a serialized enum member (an object with
/// a `value` key); anything else degrades to its string form.
pub fn enum_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(obj) => match obj.get("value") {
            Some(raw) => Some(raw.clone()),
            None => Some(json!(scalar_string(value))),
        },
        other => Some(json!(scalar_string(other))),
    }
}

/// Wrap a scalar as a one-element list; lists pass through unchanged.
pub fn ensure_list(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(_) => Some(value.clone()),
        Value::String(s) => Some(json!([s])),
        other => Some(json!([scalar_string(other)])),
    }
}

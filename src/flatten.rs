//! Recursive string extraction from nested metadata values
//!
//! Dialect documents nest descriptions inside objects and arrays of
//! arbitrary depth. The flattener pulls every scalar out as a trimmed
//! string, preserving document order, so builders can join them into
//! single-field summaries.

use serde_json::Value;

/// Recursion cutoff for pathological nesting. Real metadata documents
/// are a handful of levels deep; anything past this contributes nothing.
const MAX_DEPTH: usize = 128;

/// Extract all non-empty strings from a value, in document order.
///
/// Object keys are ignored; only values are walked. Scalars other than
/// null are stringified and trimmed, empty results are dropped.
pub fn extract_strings(value: &Value) -> Vec<String> {
    let mut strings = Vec::new();
    collect_strings(value, 0, &mut strings);
    strings
}

fn collect_strings(value: &Value, depth: usize, out: &mut Vec<String>) {
    if depth > MAX_DEPTH {
        return;
    }

    match value {
        Value::Null => {}
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
        Value::Object(obj) => {
            for v in obj.values() {
                collect_strings(v, depth + 1, out);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                collect_strings(item, depth + 1, out);
            }
        }
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
    }
}

/// Flatten a nested value to a single space-separated string.
///
/// Returns `None` when nothing textual was found.
pub fn flatten_to_string(value: &Value) -> Option<String> {
    let strings = extract_strings(value);
    if strings.is_empty() {
        None
    } else {
        Some(strings.join(" "))
    }
}

/// Flatten a nested value to a list of strings.
///
/// Returns `None` when nothing textual was found.
pub fn flatten_to_list(value: &Value) -> Option<Vec<String>> {
    let strings = extract_strings(value);
    if strings.is_empty() {
        None
    } else {
        Some(strings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_from_scalar() {
        assert_eq!(extract_strings(&json!("  hello  ")), vec!["hello"]);
        assert_eq!(extract_strings(&json!(42)), vec!["42"]);
        assert_eq!(extract_strings(&json!(true)), vec!["true"]);
        assert!(extract_strings(&json!(null)).is_empty());
        assert!(extract_strings(&json!("   ")).is_empty());
    }

    #[test]
    fn test_extract_preserves_order() {
        let value = json!({
            "description": "first",
            "details": ["second", {"note": "third"}]
        });
        assert_eq!(extract_strings(&value), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_extract_skips_empty_fragments() {
        let value = json!(["a", "", "  ", null, "b"]);
        assert_eq!(extract_strings(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_flatten_to_string() {
        let value = json!({"a": "human", "b": ["subject", "research"]});
        assert_eq!(
            flatten_to_string(&value),
            Some("human subject research".to_string())
        );
        assert_eq!(flatten_to_string(&json!([])), None);
        assert_eq!(flatten_to_string(&json!(null)), None);
    }

    #[test]
    fn test_flatten_to_list() {
        let value = json!([{"x": "a"}, "b"]);
        assert_eq!(
            flatten_to_list(&value),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(flatten_to_list(&json!({})), None);
    }

    #[test]
    fn test_deep_nesting_terminates() {
        let mut value = json!("leaf");
        for _ in 0..300 {
            value = json!([value]);
        }
        // Past the depth cutoff nothing is extracted, but the walk returns.
        let strings = extract_strings(&value);
        assert!(strings.is_empty());
    }
}

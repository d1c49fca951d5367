//! The mapping interpreter
//!
//! Walks a mapping table against a source document and produces the
//! target document. The engine is pure and synchronous: the same table
//! and source always produce the same output, and nothing here touches
//! a clock, I/O, or shared state.

use serde_json::{Map, Value};

use crate::error::DialectError;
use crate::rule::{MappingTable, Rule};

/// Apply a mapping table to a source document.
///
/// Entries are evaluated in table order:
///
/// - `Unmapped` emits nothing; it documents a known dialect gap.
/// - `Fixed` emits its constant for every source, including `{}`.
/// - `Copy` emits the source field verbatim when it is present.
/// - `Parsed` passes a present source field through its parser and
///   emits the result; an absent field skips without invoking the
///   parser.
/// - `Built` runs its builder against the whole source document.
///
/// A key never maps to null, an empty string, or an empty list in the
/// output; such results are omitted so that absence uniformly means
/// "nothing to report". A target key declared twice resolves to its
/// last-declared rule, matching plain mapping-literal overwrite
/// semantics.
pub fn apply(table: &MappingTable, source: &Map<String, Value>) -> Map<String, Value> {
    let mut target = Map::new();

    for (target_key, rule) in table.entries() {
        let resolved = match rule {
            Rule::Unmapped => None,
            Rule::Fixed(value) => Some(value.clone()),
            Rule::Copy(source_key) => source.get(*source_key).cloned(),
            Rule::Parsed(source_key, parser) => {
                source.get(*source_key).and_then(|value| parser.apply(value))
            }
            Rule::Built(builder) => builder.apply(source),
        };

        // A later rule for the same target key fully replaces the
        // earlier one, as if the table were a mapping literal.
        target.remove(*target_key);
        if let Some(value) = resolved {
            if has_content(&value) {
                target.insert(target_key.to_string(), value);
            }
        }
    }

    target
}

/// Apply a mapping table to a JSON value, checking that it is a
/// document (a JSON object) first.
pub fn convert(table: &MappingTable, source: &Value) -> Result<Value, DialectError> {
    let doc = source.as_object().ok_or_else(|| {
        DialectError::InvalidDocument("source document must be a JSON object".to_string())
    })?;
    Ok(Value::Object(apply(table, doc)))
}

/// Whether a resolved value carries anything worth emitting.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Builder, Parser};
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn sample_table() -> MappingTable {
        MappingTable::new(
            "sample",
            vec![
                ("name", Rule::Copy("title")),
                ("conformsTo", Rule::Fixed(json!("D4D Schema"))),
                ("dateCreated", Rule::Parsed("created_on", Parser::ParseDate)),
                ("keywords", Rule::Parsed("keywords", Parser::SplitKeywords)),
                ("conditionsOfAccess", Rule::Built(Builder::LicenseTerms)),
                ("rai:dataAnnotationPlatform", Rule::Unmapped),
            ],
        )
    }

    #[test]
    fn test_apply_resolves_each_rule_kind() {
        let source = doc(json!({
            "title": "Clinical Trial Data",
            "created_on": "2023-05-17T00:00:00",
            "keywords": "genomics, clinical; trial",
            "license_and_use_terms": "CC-BY"
        }));

        let target = apply(&sample_table(), &source);

        assert_eq!(target.get("name"), Some(&json!("Clinical Trial Data")));
        assert_eq!(target.get("conformsTo"), Some(&json!("D4D Schema")));
        assert_eq!(target.get("dateCreated"), Some(&json!("2023-05-17T00:00:00")));
        assert_eq!(
            target.get("keywords"),
            Some(&json!(["genomics", "clinical", "trial"]))
        );
        assert_eq!(target.get("conditionsOfAccess"), Some(&json!("CC-BY")));
    }

    #[test]
    fn test_apply_is_deterministic() {
        let source = doc(json!({
            "title": "Repeatable",
            "keywords": ["a", "b"],
            "discouraged_uses": "none"
        }));
        let first = apply(&sample_table(), &source);
        let second = apply(&sample_table(), &source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unmapped_never_emits() {
        let source = doc(json!({"rai:dataAnnotationPlatform": "Label Studio"}));
        let target = apply(&sample_table(), &source);
        assert!(!target.contains_key("rai:dataAnnotationPlatform"));
    }

    #[test]
    fn test_fixed_value_ignores_source() {
        let target = apply(&sample_table(), &Map::new());
        assert_eq!(target.get("conformsTo"), Some(&json!("D4D Schema")));
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_absent_and_empty_values_are_omitted() {
        let source = doc(json!({
            "title": null,
            "created_on": "never",
            "keywords": ""
        }));
        let target = apply(&sample_table(), &source);
        assert!(!target.contains_key("name"));
        assert!(!target.contains_key("dateCreated"));
        assert!(!target.contains_key("keywords"));
        assert!(!target.contains_key("conditionsOfAccess"));

        for value in target.values() {
            assert!(has_content(value));
        }
    }

    #[test]
    fn test_duplicate_target_key_last_rule_wins() {
        let table = MappingTable::new(
            "dup",
            vec![
                ("field", Rule::Fixed(json!("first"))),
                ("field", Rule::Fixed(json!("second"))),
            ],
        );
        let target = apply(&table, &Map::new());
        assert_eq!(target.get("field"), Some(&json!("second")));

        // The last rule governs even when it resolves to nothing: the
        // earlier entry is shadowed as in a mapping literal.
        let table = MappingTable::new(
            "dup-skip",
            vec![
                ("field", Rule::Fixed(json!("shadowed"))),
                ("field", Rule::Copy("missing")),
            ],
        );
        let target = apply(&table, &Map::new());
        assert!(!target.contains_key("field"));
    }

    #[test]
    fn test_convert_rejects_non_object_input() {
        let result = convert(&sample_table(), &json!(["not", "a", "document"]));
        assert!(result.is_err());

        let result = convert(&sample_table(), &json!({"title": "ok"}));
        assert_eq!(
            result.unwrap(),
            json!({"name": "ok", "conformsTo": "D4D Schema"})
        );
    }

    #[test]
    fn test_output_preserves_table_order() {
        let source = doc(json!({
            "title": "Ordered",
            "license_and_use_terms": "MIT"
        }));
        let target = apply(&sample_table(), &source);
        let keys: Vec<&str> = target.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "conformsTo", "conditionsOfAccess"]);
    }
}

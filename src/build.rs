//! Field builders for cross-field dialect conversions
//!
//! A builder receives the whole source document because its output is
//! derived from several fields at once (combining license terms,
//! digging a contact email out of nested review records, and so on).
//! Builders are pure and tolerant: an absent field, a null, or a value
//! of an unexpected shape simply contributes nothing. They return
//! `None` rather than an empty string or list when nothing was found,
//! so the interpreter can omit the target field.
//!
//! Join separators are part of each builder's contract; downstream
//! consumers match on them.

use serde_json::{json, Map, Value};

use crate::flatten::{flatten_to_list, flatten_to_string};
use crate::parse::{enum_value, is_truthy, scalar_string};

/// Look up a field, treating falsy values as absent.
fn field<'a>(doc: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    doc.get(key).filter(|v| is_truthy(v))
}

/// View a field that may hold a single record or a sequence of records
/// as a flat list of records. Non-record elements are skipped.
fn records(value: &Value) -> Vec<&Map<String, Value>> {
    match value {
        Value::Object(obj) => vec![obj],
        Value::Array(arr) => arr.iter().filter_map(|v| v.as_object()).collect(),
        _ => vec![],
    }
}

/// Flatten each present candidate field and join the results.
fn join_fields(doc: &Map<String, Value>, keys: &[&str], separator: &str) -> Option<Value> {
    let parts: Vec<String> = keys
        .iter()
        .filter_map(|key| field(doc, key))
        .filter_map(flatten_to_string)
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(json!(parts.join(separator)))
    }
}

/// Combine license, IP and regulatory restriction fields into one
/// access-conditions string.
pub fn combine_license_terms(doc: &Map<String, Value>) -> Option<Value> {
    join_fields(
        doc,
        &["license_and_use_terms", "ip_restrictions", "regulatory_restrictions"],
        " | ",
    )
}

/// Combine limitation-related fields.
pub fn combine_limitations(doc: &Map<String, Value>) -> Option<Value> {
    join_fields(doc, &["discouraged_uses", "errata", "content_warnings"], " ")
}

/// Combine bias-related fields.
pub fn combine_biases(doc: &Map<String, Value>) -> Option<Value> {
    join_fields(doc, &["anomalies", "subpopulations"], "; ")
}

/// Combine use-case fields.
pub fn combine_use_cases(doc: &Map<String, Value>) -> Option<Value> {
    join_fields(doc, &["purposes", "tasks", "existing_uses", "other_tasks"], " ")
}

/// Combine maintenance fields into labeled segments.
pub fn combine_maintenance(doc: &Map<String, Value>) -> Option<Value> {
    let mut parts = Vec::new();
    for (key, label) in [
        ("maintainers", "Maintainers"),
        ("updates", "Updates"),
        ("retention_limit", "Retention"),
    ] {
        if let Some(text) = field(doc, key).and_then(flatten_to_string) {
            parts.push(format!("{}: {}", label, text));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(json!(parts.join(" | ")))
    }
}

/// Summarize data collection: acquisition methods plus an instance
/// count when instances are documented.
pub fn combine_collection_info(doc: &Map<String, Value>) -> Option<Value> {
    let mut parts = Vec::new();
    if let Some(text) = field(doc, "acquisition_methods").and_then(flatten_to_string) {
        parts.push(text);
    }
    if let Some(instances) = field(doc, "instances") {
        match instances {
            Value::Array(arr) => parts.push(format!("{} instances", arr.len())),
            _ => parts.push("Instances documented".to_string()),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(json!(parts.join(" ")))
    }
}

/// Extract collection mechanisms as a list.
pub fn combine_collection_mechanisms(doc: &Map<String, Value>) -> Option<Value> {
    field(doc, "collection_mechanisms")
        .and_then(flatten_to_list)
        .map(|items| json!(items))
}

/// Combine confidential and sensitive element fields into a list,
/// with a labeled de-identification entry when present.
pub fn combine_sensitive_info(doc: &Map<String, Value>) -> Option<Value> {
    let mut items = Vec::new();
    for key in ["confidential_elements", "sensitive_elements"] {
        if let Some(found) = field(doc, key).and_then(flatten_to_list) {
            items.extend(found);
        }
    }
    if let Some(deident) = field(doc, "is_deidentified").and_then(flatten_to_string) {
        items.push(format!("Deidentified: {}", deident));
    }
    if items.is_empty() {
        None
    } else {
        Some(json!(items))
    }
}

/// Combine social-impact fields.
pub fn combine_social_impact(doc: &Map<String, Value>) -> Option<Value> {
    join_fields(doc, &["future_use_impacts", "data_protection_impacts"], " ")
}

/// Gather missing-data documentation from the dataset level and from
/// each documented instance.
pub fn extract_missing_data(doc: &Map<String, Value>) -> Option<Value> {
    let mut parts = Vec::new();
    if let Some(text) = field(doc, "missing_data_documentation").and_then(flatten_to_string) {
        parts.push(text);
    }
    if let Some(Value::Array(instances)) = field(doc, "instances") {
        for instance in instances {
            let info = instance
                .as_object()
                .and_then(|obj| field(obj, "missing_information"))
                .and_then(flatten_to_string);
            if let Some(text) = info {
                parts.push(text);
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(json!(parts.join(" ")))
    }
}

/// Extract collection timeframes as a list.
pub fn extract_collection_timeframe(doc: &Map<String, Value>) -> Option<Value> {
    field(doc, "collection_timeframes")
        .and_then(flatten_to_list)
        .map(|items| json!(items))
}

/// Extract the imputation protocol description.
pub fn extract_imputation_protocol(doc: &Map<String, Value>) -> Option<Value> {
    field(doc, "imputation_protocols")
        .and_then(flatten_to_string)
        .map(|text| json!(text))
}

/// Extract annotation analyses as a list.
pub fn extract_annotation_analysis(doc: &Map<String, Value>) -> Option<Value> {
    field(doc, "annotation_analyses")
        .and_then(flatten_to_list)
        .map(|items| json!(items))
}

/// Collect one named field from every labeling-strategy record.
fn collect_from_strategies(doc: &Map<String, Value>, key: &str) -> Option<Value> {
    let strategies = field(doc, "labeling_strategies")?;
    let items: Vec<String> = records(strategies)
        .into_iter()
        .filter_map(|record| field(record, key))
        .map(scalar_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(json!(items.join(", ")))
    }
}

/// Extract annotations-per-item from labeling strategies.
pub fn extract_annotations_per_item(doc: &Map<String, Value>) -> Option<Value> {
    collect_from_strategies(doc, "annotations_per_item")
}

/// Extract annotation platforms from labeling strategies.
pub fn extract_annotation_platform(doc: &Map<String, Value>) -> Option<Value> {
    collect_from_strategies(doc, "data_annotation_platform")
}

/// Extract the human-subject-research description.
pub fn extract_human_subject(doc: &Map<String, Value>) -> Option<Value> {
    field(doc, "human_subject_research")
        .and_then(flatten_to_string)
        .map(|text| json!(text))
}

/// Extract the confidentiality level from regulatory restrictions,
/// first match wins.
pub fn extract_confidentiality_level(doc: &Map<String, Value>) -> Option<Value> {
    let restrictions = field(doc, "regulatory_restrictions")?;
    records(restrictions)
        .into_iter()
        .filter_map(|record| field(record, "confidentiality_level"))
        .find_map(enum_value)
}

/// Extract the governance committee contact from regulatory
/// restrictions, first match wins.
pub fn extract_governance_committee(doc: &Map<String, Value>) -> Option<Value> {
    let restrictions = field(doc, "regulatory_restrictions")?;
    records(restrictions)
        .into_iter()
        .find_map(|record| field(record, "governance_committee_contact"))
        .cloned()
}

/// Extract prohibited/discouraged uses.
pub fn extract_prohibited_uses(doc: &Map<String, Value>) -> Option<Value> {
    field(doc, "discouraged_uses")
        .and_then(flatten_to_string)
        .map(|text| json!(text))
}

/// Collect the names of principal investigators from the creator
/// records flagged as such.
///
/// Name resolution order per creator: `person.name`, `person.id`, the
/// `person` field itself when it is a plain string reference, then the
/// creator's own `name` or `id`.
pub fn extract_principal_investigator(doc: &Map<String, Value>) -> Option<Value> {
    let Some(Value::Array(creators)) = field(doc, "creators") else {
        return None;
    };

    let mut names = Vec::new();
    for creator in creators {
        let Some(creator) = creator.as_object() else {
            continue;
        };
        if field(creator, "principal_investigator").is_none() {
            continue;
        }
        let resolved = match creator.get("person") {
            Some(Value::Object(person)) => field(person, "name")
                .or_else(|| field(person, "id"))
                .map(scalar_string),
            Some(Value::String(reference)) if !reference.is_empty() => {
                Some(reference.clone())
            }
            _ => field(creator, "name")
                .or_else(|| field(creator, "id"))
                .map(scalar_string),
        };
        if let Some(name) = resolved {
            names.push(name);
        }
    }

    if names.is_empty() {
        None
    } else {
        Some(json!(names.join(", ")))
    }
}

/// Find the first contact email in the ethical review records.
///
/// A `contact_person` may be a nested record with an `email` field or
/// a bare string reference; the first match wins.
pub fn extract_contact_email(doc: &Map<String, Value>) -> Option<Value> {
    let reviews = field(doc, "ethical_reviews")?;
    for review in records(reviews) {
        match review.get("contact_person") {
            Some(Value::Object(contact)) => {
                if let Some(email) = field(contact, "email") {
                    return Some(email.clone());
                }
            }
            Some(Value::String(reference)) if !reference.is_empty() => {
                return Some(json!(reference));
            }
            _ => {}
        }
    }
    None
}

/// Collect usage notes attached to existing uses and purposes.
pub fn extract_usage_info(doc: &Map<String, Value>) -> Option<Value> {
    let mut items = Vec::new();
    for key in ["existing_uses", "purposes"] {
        if let Some(Value::Array(entries)) = field(doc, key) {
            for entry in entries {
                let notes = entry
                    .as_object()
                    .and_then(|obj| field(obj, "usage_notes"))
                    .map(scalar_string);
                if let Some(text) = notes {
                    items.push(text);
                }
            }
        }
    }
    if items.is_empty() {
        None
    } else {
        Some(json!(items.join(" | ")))
    }
}

/// Collect machine annotation tool names into a single list.
///
/// Each record may hold a `tools` field that is itself a scalar or a
/// sequence.
pub fn extract_machine_annotation_tools(doc: &Map<String, Value>) -> Option<Value> {
    let tools_data = field(doc, "machine_annotation_tools")?;
    let mut items = Vec::new();
    for record in records(tools_data) {
        match field(record, "tools") {
            Some(Value::Array(tools)) => {
                items.extend(tools.iter().filter(|t| is_truthy(t)).map(scalar_string));
            }
            Some(tool) => items.push(scalar_string(tool)),
            None => {}
        }
    }
    if items.is_empty() {
        None
    } else {
        Some(json!(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_combine_license_terms() {
        let source = doc(json!({
            "license_and_use_terms": "CC-BY",
            "ip_restrictions": null
        }));
        assert_eq!(combine_license_terms(&source), Some(json!("CC-BY")));

        let source = doc(json!({
            "license_and_use_terms": "CC-BY",
            "ip_restrictions": "no commercial use",
            "regulatory_restrictions": {"summary": "HIPAA"}
        }));
        assert_eq!(
            combine_license_terms(&source),
            Some(json!("CC-BY | no commercial use | HIPAA"))
        );
    }

    #[test]
    fn test_combine_biases_separator() {
        let source = doc(json!({
            "anomalies": "sampling skew",
            "subpopulations": ["rural", "urban"]
        }));
        assert_eq!(
            combine_biases(&source),
            Some(json!("sampling skew; rural urban"))
        );
    }

    #[test]
    fn test_combine_maintenance_labels() {
        let source = doc(json!({
            "maintainers": ["Data Team"],
            "retention_limit": "5 years"
        }));
        assert_eq!(
            combine_maintenance(&source),
            Some(json!("Maintainers: Data Team | Retention: 5 years"))
        );
    }

    #[test]
    fn test_combine_collection_info_counts_instances() {
        let source = doc(json!({
            "acquisition_methods": "surveys",
            "instances": [{"id": 1}, {"id": 2}]
        }));
        assert_eq!(
            combine_collection_info(&source),
            Some(json!("surveys 2 instances"))
        );

        let source = doc(json!({"instances": "see appendix"}));
        assert_eq!(
            combine_collection_info(&source),
            Some(json!("Instances documented"))
        );
    }

    #[test]
    fn test_combine_sensitive_info() {
        let source = doc(json!({
            "confidential_elements": ["names"],
            "sensitive_elements": ["diagnoses"],
            "is_deidentified": true
        }));
        assert_eq!(
            combine_sensitive_info(&source),
            Some(json!(["names", "diagnoses", "Deidentified: true"]))
        );
    }

    #[test]
    fn test_extract_missing_data_from_instances() {
        let source = doc(json!({
            "missing_data_documentation": "see codebook",
            "instances": [
                {"missing_information": "age gaps"},
                {"name": "no missing field"},
                "not a record"
            ]
        }));
        assert_eq!(
            extract_missing_data(&source),
            Some(json!("see codebook age gaps"))
        );
    }

    #[test]
    fn test_extract_principal_investigator() {
        let source = doc(json!({
            "creators": [
                {"principal_investigator": true, "person": {"name": "A. Smith"}},
                {"principal_investigator": false, "name": "B. Jones"}
            ]
        }));
        assert_eq!(
            extract_principal_investigator(&source),
            Some(json!("A. Smith"))
        );
    }

    #[test]
    fn test_principal_investigator_name_fallbacks() {
        let source = doc(json!({
            "creators": [
                {"principal_investigator": true, "person": {"id": "orcid:1"}},
                {"principal_investigator": true, "person": "orcid:2"},
                {"principal_investigator": true, "name": "C. Doe"},
                {"principal_investigator": true, "id": "local:4"}
            ]
        }));
        assert_eq!(
            extract_principal_investigator(&source),
            Some(json!("orcid:1, orcid:2, C. Doe, local:4"))
        );
    }

    #[test]
    fn test_extract_contact_email() {
        let source = doc(json!({
            "ethical_reviews": [
                {"board": "IRB", "contact_person": {"name": "X"}},
                {"contact_person": {"email": "irb@example.org"}}
            ]
        }));
        assert_eq!(
            extract_contact_email(&source),
            Some(json!("irb@example.org"))
        );

        let source = doc(json!({
            "ethical_reviews": {"contact_person": "person:reviewer-1"}
        }));
        assert_eq!(
            extract_contact_email(&source),
            Some(json!("person:reviewer-1"))
        );
    }

    #[test]
    fn test_extract_confidentiality_level_enum() {
        let source = doc(json!({
            "regulatory_restrictions": [
                {"governance_committee_contact": "gov@example.org"},
                {"confidentiality_level": {"value": "restricted"}}
            ]
        }));
        assert_eq!(
            extract_confidentiality_level(&source),
            Some(json!("restricted"))
        );
        assert_eq!(
            extract_governance_committee(&source),
            Some(json!("gov@example.org"))
        );
    }

    #[test]
    fn test_extract_from_labeling_strategies() {
        let source = doc(json!({
            "labeling_strategies": [
                {"annotations_per_item": 3, "data_annotation_platform": "Label Studio"},
                {"annotations_per_item": "5"},
                {"method": "manual"}
            ]
        }));
        assert_eq!(extract_annotations_per_item(&source), Some(json!("3, 5")));
        assert_eq!(
            extract_annotation_platform(&source),
            Some(json!("Label Studio"))
        );

        // Single record instead of a sequence
        let source = doc(json!({
            "labeling_strategies": {"annotations_per_item": 2}
        }));
        assert_eq!(extract_annotations_per_item(&source), Some(json!("2")));
    }

    #[test]
    fn test_extract_machine_annotation_tools() {
        let source = doc(json!({
            "machine_annotation_tools": [
                {"tools": ["spaCy", "Prodigy"]},
                {"tools": "custom-tagger"}
            ]
        }));
        assert_eq!(
            extract_machine_annotation_tools(&source),
            Some(json!(["spaCy", "Prodigy", "custom-tagger"]))
        );
    }

    #[test]
    fn test_extract_usage_info() {
        let source = doc(json!({
            "existing_uses": [{"usage_notes": "benchmarking"}],
            "purposes": [{"usage_notes": "training"}, {"name": "no notes"}]
        }));
        assert_eq!(
            extract_usage_info(&source),
            Some(json!("benchmarking | training"))
        );
    }

    #[test]
    fn test_builders_tolerate_empty_document() {
        let empty = Map::new();
        assert_eq!(combine_license_terms(&empty), None);
        assert_eq!(combine_limitations(&empty), None);
        assert_eq!(combine_biases(&empty), None);
        assert_eq!(combine_use_cases(&empty), None);
        assert_eq!(combine_maintenance(&empty), None);
        assert_eq!(combine_collection_info(&empty), None);
        assert_eq!(combine_collection_mechanisms(&empty), None);
        assert_eq!(combine_sensitive_info(&empty), None);
        assert_eq!(combine_social_impact(&empty), None);
        assert_eq!(extract_missing_data(&empty), None);
        assert_eq!(extract_collection_timeframe(&empty), None);
        assert_eq!(extract_imputation_protocol(&empty), None);
        assert_eq!(extract_annotation_analysis(&empty), None);
        assert_eq!(extract_annotations_per_item(&empty), None);
        assert_eq!(extract_annotation_platform(&empty), None);
        assert_eq!(extract_human_subject(&empty), None);
        assert_eq!(extract_confidentiality_level(&empty), None);
        assert_eq!(extract_governance_committee(&empty), None);
        assert_eq!(extract_prohibited_uses(&empty), None);
        assert_eq!(extract_principal_investigator(&empty), None);
        assert_eq!(extract_contact_email(&empty), None);
        assert_eq!(extract_usage_info(&empty), None);
        assert_eq!(extract_machine_annotation_tools(&empty), None);
    }

    #[test]
    fn test_builders_tolerate_wrong_shapes() {
        // Strings where sequences are expected, numbers where records
        // are expected: everything degrades to None, never a panic.
        let source = doc(json!({
            "creators": "not a list",
            "ethical_reviews": 42,
            "regulatory_restrictions": ["just a string"],
            "labeling_strategies": true,
            "machine_annotation_tools": [17],
            "instances": {"not": "a list"},
            "existing_uses": "not a list"
        }));
        assert_eq!(extract_principal_investigator(&source), None);
        assert_eq!(extract_contact_email(&source), None);
        assert_eq!(extract_confidentiality_level(&source), None);
        assert_eq!(extract_governance_committee(&source), None);
        assert_eq!(extract_annotations_per_item(&source), None);
        assert_eq!(extract_machine_annotation_tools(&source), None);
        assert_eq!(extract_missing_data(&source), None);
        assert_eq!(extract_usage_info(&source), None);
    }
}

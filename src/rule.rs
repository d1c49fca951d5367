//! Declarative conversion rules and mapping tables
//!
//! A mapping table is data, not code: an ordered list of target fields,
//! each paired with a rule naming where its value comes from. Parsers
//! and builders are referenced through closed registry enums so that a
//! table can never point at a function that does not exist and every
//! rule shape is covered by exhaustive matching.

use serde_json::{json, Map, Value};
use std::collections::HashSet;
use tracing::warn;

use crate::build;
use crate::flatten::{flatten_to_list, flatten_to_string};
use crate::parse;

/// Registry of scalar parsers a rule may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parser {
    /// Timestamp string to canonical structured date
    ParseDate,
    /// Structured date to ISO-8601 string
    FormatDate,
    /// Keyword text to a list of keywords
    SplitKeywords,
    /// List to comma-separated string
    JoinList,
    /// Human-readable size to byte count
    ParseSize,
    /// Byte count to human-readable size
    FormatSize,
    /// Serialized enum member to its raw value
    EnumValue,
    /// Scalar to one-element list
    EnsureList,
    /// Nested value to one space-joined string
    FlattenToString,
    /// Nested value to a flat list of strings
    FlattenToList,
}

impl Parser {
    /// Run the parser. Total: malformed input yields `None`.
    pub fn apply(&self, value: &Value) -> Option<Value> {
        match self {
            Parser::ParseDate => parse::parse_date(value),
            Parser::FormatDate => parse::format_date(value),
            Parser::SplitKeywords => parse::split_keywords(value),
            Parser::JoinList => parse::join_list(value),
            Parser::ParseSize => parse::parse_size(value),
            Parser::FormatSize => parse::format_size(value),
            Parser::EnumValue => parse::enum_value(value),
            Parser::EnsureList => parse::ensure_list(value),
            Parser::FlattenToString => flatten_to_string(value).map(|s| json!(s)),
            Parser::FlattenToList => flatten_to_list(value).map(|items| json!(items)),
        }
    }
}

/// Registry of field builders a rule may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builder {
    LicenseTerms,
    Limitations,
    Biases,
    UseCases,
    Maintenance,
    CollectionInfo,
    CollectionMechanisms,
    SensitiveInfo,
    SocialImpact,
    MissingData,
    CollectionTimeframe,
    ImputationProtocol,
    AnnotationAnalysis,
    AnnotationsPerItem,
    AnnotationPlatform,
    HumanSubject,
    ConfidentialityLevel,
    GovernanceCommittee,
    ProhibitedUses,
    PrincipalInvestigator,
    ContactEmail,
    UsageInfo,
    MachineAnnotationTools,
}

impl Builder {
    /// Run the builder against the whole source document.
    pub fn apply(&self, doc: &Map<String, Value>) -> Option<Value> {
        match self {
            Builder::LicenseTerms => build::combine_license_terms(doc),
            Builder::Limitations => build::combine_limitations(doc),
            Builder::Biases => build::combine_biases(doc),
            Builder::UseCases => build::combine_use_cases(doc),
            Builder::Maintenance => build::combine_maintenance(doc),
            Builder::CollectionInfo => build::combine_collection_info(doc),
            Builder::CollectionMechanisms => build::combine_collection_mechanisms(doc),
            Builder::SensitiveInfo => build::combine_sensitive_info(doc),
            Builder::SocialImpact => build::combine_social_impact(doc),
            Builder::MissingData => build::extract_missing_data(doc),
            Builder::CollectionTimeframe => build::extract_collection_timeframe(doc),
            Builder::ImputationProtocol => build::extract_imputation_protocol(doc),
            Builder::AnnotationAnalysis => build::extract_annotation_analysis(doc),
            Builder::AnnotationsPerItem => build::extract_annotations_per_item(doc),
            Builder::AnnotationPlatform => build::extract_annotation_platform(doc),
            Builder::HumanSubject => build::extract_human_subject(doc),
            Builder::ConfidentialityLevel => build::extract_confidentiality_level(doc),
            Builder::GovernanceCommittee => build::extract_governance_committee(doc),
            Builder::ProhibitedUses => build::extract_prohibited_uses(doc),
            Builder::PrincipalInvestigator => build::extract_principal_investigator(doc),
            Builder::ContactEmail => build::extract_contact_email(doc),
            Builder::UsageInfo => build::extract_usage_info(doc),
            Builder::MachineAnnotationTools => build::extract_machine_annotation_tools(doc),
        }
    }
}

/// How one target field gets its value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Copy a source field verbatim
    Copy(&'static str),
    /// Copy a source field through a scalar parser
    Parsed(&'static str, Parser),
    /// Derive the value from the whole source document
    Built(Builder),
    /// Emit a constant, ignoring the source
    Fixed(Value),
    /// No equivalent exists in the source dialect; documents a known
    /// gap as opposed to a forgotten mapping
    Unmapped,
}

/// An ordered ruleset for one dialect-pair conversion.
///
/// Tables are immutable configuration: built once at process start and
/// shared by every conversion. Entry order is the interpreter's
/// evaluation order, so a duplicated target key resolves to its
/// last-declared rule.
#[derive(Debug, Clone)]
pub struct MappingTable {
    name: &'static str,
    entries: Vec<(&'static str, Rule)>,
}

impl MappingTable {
    /// Build a table, warning about duplicated target keys.
    ///
    /// Duplicates are kept (last-wins at apply time) but are almost
    /// always an authoring mistake, so they are surfaced as a lint.
    pub fn new(name: &'static str, entries: Vec<(&'static str, Rule)>) -> Self {
        let mut seen = HashSet::new();
        for (target_key, _) in &entries {
            if !seen.insert(*target_key) {
                warn!(
                    table = name,
                    key = *target_key,
                    "duplicate target key in mapping table; last rule wins"
                );
            }
        }
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Entries in evaluation order.
    pub fn entries(&self) -> &[(&'static str, Rule)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_entry_order() {
        let table = MappingTable::new(
            "test",
            vec![
                ("b", Rule::Copy("x")),
                ("a", Rule::Unmapped),
                ("c", Rule::Fixed(json!("v"))),
            ],
        );
        let keys: Vec<&str> = table.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let table = MappingTable::new(
            "test",
            vec![("k", Rule::Fixed(json!(1))), ("k", Rule::Fixed(json!(2)))],
        );
        assert_eq!(table.entries().len(), 2);
    }

    #[test]
    fn test_parser_registry_dispatch() {
        assert_eq!(
            Parser::SplitKeywords.apply(&json!("a; b")),
            Some(json!(["a", "b"]))
        );
        assert_eq!(
            Parser::FlattenToString.apply(&json!({"x": ["a", "b"]})),
            Some(json!("a b"))
        );
        assert_eq!(Parser::FlattenToList.apply(&json!(null)), None);
    }
}

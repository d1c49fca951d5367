//! Concrete mapping tables for each dialect pair
//!
//! Tables are process-lifetime configuration: built on first use and
//! shared by every conversion. The field sets mirror the D4D datasheet
//! vocabulary on one side and the RO-Crate / Croissant RAI vocabulary
//! on the other.
//!
//! `Unmapped` entries record fields for which the source dialect has no
//! equivalent; they never emit output but distinguish a known gap from
//! a forgotten mapping.

use serde_json::json;
use std::sync::LazyLock;

use crate::rule::{Builder, MappingTable, Parser, Rule};
use crate::rule::Rule::{Built, Copy, Fixed, Parsed, Unmapped};

/// D4D dataset collection to RO-Crate release metadata.
///
/// Note: `rai:dataAnnotationProtocol` is declared twice; the later
/// entry (from `annotation_analyses`) wins and the construction lint
/// flags the duplicate.
pub static DATASET_COLLECTION_TO_RELEASE: LazyLock<MappingTable> = LazyLock::new(|| {
    MappingTable::new(
        "dataset-collection-to-release",
        vec![
            // Core metadata
            ("@id", Copy("id")),
            ("name", Copy("title")),
            ("description", Copy("description")),
            ("author", Parsed("creators", Parser::JoinList)),
            ("version", Copy("version")),
            ("license", Copy("license")),
            ("keywords", Copy("keywords")),
            ("identifier", Copy("doi")),
            ("publisher", Copy("publisher")),
            // Dates
            ("datePublished", Parsed("issued", Parser::FormatDate)),
            ("dateCreated", Parsed("created_on", Parser::FormatDate)),
            ("dateModified", Parsed("last_updated_on", Parser::FormatDate)),
            // Links and content
            ("url", Copy("page")),
            ("contentUrl", Copy("download_url")),
            ("encodingFormat", Parsed("encoding", Parser::EnumValue)),
            ("contentSize", Parsed("bytes", Parser::FormatSize)),
            ("conditionsOfAccess", Built(Builder::LicenseTerms)),
            ("conformsTo", Copy("conforms_to")),
            // RAI data lifecycle
            ("rai:dataLimitations", Built(Builder::Limitations)),
            ("rai:dataCollection", Built(Builder::CollectionInfo)),
            ("rai:dataCollectionType", Built(Builder::CollectionMechanisms)),
            ("rai:dataCollectionMissingData", Built(Builder::MissingData)),
            ("rai:dataCollectionRawData", Parsed("raw_sources", Parser::FlattenToString)),
            ("rai:dataCollectionTimeframe", Built(Builder::CollectionTimeframe)),
            ("rai:dataPreprocessingProtocol", Parsed("preprocessing_strategies", Parser::FlattenToList)),
            // RAI data labeling
            ("rai:dataAnnotationProtocol", Parsed("labeling_strategies", Parser::FlattenToString)),
            ("rai:dataAnnotationPlatform", Built(Builder::AnnotationPlatform)),
            ("rai:dataAnnotationAnalysis", Built(Builder::AnnotationAnalysis)),
            ("rai:dataAnnotationProtocol", Parsed("annotation_analyses", Parser::FlattenToString)),
            ("rai:annotationsPerItem", Built(Builder::AnnotationsPerItem)),
            ("rai:machineAnnotationTools", Built(Builder::MachineAnnotationTools)),
            // RAI safety and fairness
            ("rai:dataBiases", Built(Builder::Biases)),
            ("rai:dataSocialImpact", Built(Builder::SocialImpact)),
            ("rai:personalSensitiveInformation", Built(Builder::SensitiveInfo)),
            ("rai:dataUseCases", Built(Builder::UseCases)),
            // RAI compliance and governance
            ("rai:dataManipulationProtocol", Parsed("cleaning_strategies", Parser::FlattenToString)),
            ("rai:dataImputationProtocol", Built(Builder::ImputationProtocol)),
            ("rai:dataReleaseMaintenancePlan", Built(Builder::Maintenance)),
            // Additional metadata
            ("funder", Parsed("funders", Parser::FlattenToString)),
            ("ethicalReview", Parsed("ethical_reviews", Parser::FlattenToString)),
            ("citation", Copy("citation")),
            ("principalInvestigator", Built(Builder::PrincipalInvestigator)),
            ("contactEmail", Built(Builder::ContactEmail)),
            ("usageInfo", Built(Builder::UsageInfo)),
            ("confidentialityLevel", Built(Builder::ConfidentialityLevel)),
            ("humanSubject", Built(Builder::HumanSubject)),
            ("governanceCommittee", Built(Builder::GovernanceCommittee)),
            ("prohibitedUses", Built(Builder::ProhibitedUses)),
        ],
    )
});

/// D4D dataset to RO-Crate subcrate metadata.
///
/// Same shape as the release table plus the file-level fields a
/// subcrate carries (format and checksums).
pub static DATASET_TO_SUBCRATE: LazyLock<MappingTable> = LazyLock::new(|| {
    MappingTable::new(
        "dataset-to-subcrate",
        vec![
            // Core metadata
            ("@id", Copy("id")),
            ("name", Copy("title")),
            ("description", Copy("description")),
            ("author", Parsed("creators", Parser::JoinList)),
            ("version", Copy("version")),
            ("license", Copy("license")),
            ("keywords", Copy("keywords")),
            ("identifier", Copy("doi")),
            ("publisher", Copy("publisher")),
            // Dates
            ("datePublished", Parsed("issued", Parser::FormatDate)),
            ("dateCreated", Parsed("created_on", Parser::FormatDate)),
            ("dateModified", Parsed("last_updated_on", Parser::FormatDate)),
            // Links and content
            ("url", Copy("page")),
            ("contentUrl", Copy("download_url")),
            ("encodingFormat", Parsed("encoding", Parser::EnumValue)),
            ("fileFormat", Parsed("format", Parser::EnumValue)),
            ("contentSize", Parsed("bytes", Parser::FormatSize)),
            // Checksums
            ("md5", Copy("md5")),
            ("sha256", Copy("sha256")),
            // Access and conformance
            ("conditionsOfAccess", Built(Builder::LicenseTerms)),
            ("conformsTo", Copy("conforms_to")),
            // RAI data lifecycle
            ("rai:dataLimitations", Built(Builder::Limitations)),
            ("rai:dataCollection", Built(Builder::CollectionInfo)),
            ("rai:dataCollectionType", Built(Builder::CollectionMechanisms)),
            ("rai:dataCollectionMissingData", Built(Builder::MissingData)),
            ("rai:dataCollectionRawData", Parsed("raw_sources", Parser::FlattenToString)),
            ("rai:dataCollectionTimeframe", Built(Builder::CollectionTimeframe)),
            ("rai:dataPreprocessingProtocol", Parsed("preprocessing_strategies", Parser::FlattenToList)),
            // RAI data labeling
            ("rai:dataAnnotationProtocol", Parsed("labeling_strategies", Parser::FlattenToString)),
            ("rai:dataAnnotationPlatform", Built(Builder::AnnotationPlatform)),
            ("rai:dataAnnotationAnalysis", Built(Builder::AnnotationAnalysis)),
            ("rai:annotationsPerItem", Built(Builder::AnnotationsPerItem)),
            ("rai:machineAnnotationTools", Built(Builder::MachineAnnotationTools)),
            // RAI safety and fairness
            ("rai:dataBiases", Built(Builder::Biases)),
            ("rai:dataSocialImpact", Built(Builder::SocialImpact)),
            ("rai:personalSensitiveInformation", Built(Builder::SensitiveInfo)),
            ("rai:dataUseCases", Built(Builder::UseCases)),
            // RAI compliance and governance
            ("rai:dataManipulationProtocol", Parsed("cleaning_strategies", Parser::FlattenToString)),
            ("rai:dataImputationProtocol", Built(Builder::ImputationProtocol)),
            ("rai:dataReleaseMaintenancePlan", Built(Builder::Maintenance)),
            // Additional metadata
            ("funder", Parsed("funders", Parser::FlattenToString)),
            ("ethicalReview", Parsed("ethical_reviews", Parser::FlattenToString)),
            ("citation", Copy("citation")),
            ("principalInvestigator", Built(Builder::PrincipalInvestigator)),
            ("contactEmail", Built(Builder::ContactEmail)),
            ("usageInfo", Built(Builder::UsageInfo)),
            ("confidentialityLevel", Built(Builder::ConfidentialityLevel)),
            ("humanSubject", Built(Builder::HumanSubject)),
            ("governanceCommittee", Built(Builder::GovernanceCommittee)),
            ("prohibitedUses", Built(Builder::ProhibitedUses)),
        ],
    )
});

/// RO-Crate metadata back to a D4D datasheet.
///
/// The reverse direction is flatter: mostly verbatim copies plus date
/// and size parsing. Fields the RO-Crate dialect cannot provide are
/// declared `Unmapped`.
pub static ROCRATE_TO_D4D: LazyLock<MappingTable> = LazyLock::new(|| {
    MappingTable::new(
        "rocrate-to-d4d",
        vec![
            // Named thing
            ("id", Copy("@id")),
            ("name", Copy("name")),
            ("title", Copy("name")),
            ("description", Copy("description")),
            // Information
            ("compression", Copy("evi:formats")),
            ("conforms_to", Fixed(json!("D4D Schema"))),
            ("created_by", Copy("author")),
            ("created_on", Parsed("dateCreated", Parser::ParseDate)),
            ("doi", Copy("identifier")),
            ("download_url", Copy("contentUrl")),
            ("keywords", Copy("keywords")),
            ("language", Copy("language")),
            ("last_updated_on", Parsed("dateModified", Parser::ParseDate)),
            ("license", Copy("license")),
            ("page", Copy("url")),
            ("publisher", Copy("publisher")),
            ("version", Copy("version")),
            ("was_derived_from", Copy("generatedBy")),
            // Dataset content
            ("bytes", Parsed("contentSize", Parser::ParseSize)),
            ("encoding", Copy("evi:formats")),
            ("format", Copy("evi:formats")),
            ("hash", Copy("MD5")),
            ("md5", Copy("MD5")),
            ("sha256", Copy("sha256")),
            ("media_type", Unmapped),
            ("path", Unmapped),
            ("external_resources", Unmapped),
            ("resources", Unmapped),
            // Motivation and composition
            ("purposes", Copy("rai:dataUseCases")),
            ("tasks", Copy("rai:dataUseCases")),
            ("addressing_gaps", Unmapped),
            ("creators", Copy("author")),
            ("funders", Copy("funders")),
            ("subsets", Unmapped),
            ("instances", Unmapped),
            ("anomalies", Unmapped),
            ("known_biases", Copy("rai:dataBiases")),
            ("known_limitations", Copy("rai:dataLimitations")),
            ("confidential_elements", Unmapped),
            ("content_warnings", Unmapped),
            ("subpopulations", Unmapped),
            ("sensitive_elements", Copy("rai:personalSensitiveInformation")),
            // Collection
            ("aquisition_methods", Copy("rai:dataCollection")),
            ("collection_mechanisms", Copy("rai:dataCollection")),
            ("sampling_strategies", Unmapped),
            ("data_collectors", Unmapped),
            ("collection_timeframes", Copy("rai:dataCollectionTimeframe")),
            ("missing_data_documentation", Copy("rai:dataCollectionMissingData")),
            ("raw_data_sources", Copy("rai:dataCollectionRawData")),
            ("ethical_reviews", Copy("ethicalReview")),
            ("data_protection_impacts", Unmapped),
            ("human_subject_research", Copy("humanSubject")),
            ("informed_consent", Unmapped),
            ("participant_privacy", Unmapped),
            ("participant_compensation", Unmapped),
            ("vulnerable_populations", Unmapped),
            // Preprocessing and labeling
            ("preprocessing_strategies", Copy("rai:dataPreprocessingProtocol")),
            ("cleaning_strategies", Unmapped),
            ("labeling_strategies", Copy("rai:dataAnnotationProtocol")),
            ("raw_sources", Copy("rai:dataCollectionRawData")),
            ("imputation_protocols", Copy("rai:dataImputationProtocol")),
            ("annotation_analyses", Copy("rai:dataAnnotationProtocol")),
            ("machine_annotation_tools", Copy("rai:machineAnnotationTools")),
            // Uses and distribution
            ("existing_uses", Unmapped),
            ("use_repository", Unmapped),
            ("other_tasks", Unmapped),
            ("future_use_impacts", Copy("rai:dataSocialImpact")),
            ("discouraged_uses", Copy("prohibitedUses")),
            ("intended_uses", Copy("rai:dataUseCases")),
            ("prohibited_uses", Copy("prohibitedUses")),
            ("distribution_formats", Copy("evi:formats")),
            ("license_and_use_terms", Copy("license")),
            ("ip_restrictions", Unmapped),
            ("regional_restrictions", Unmapped),
            // Maintenance
            ("maintainers", Unmapped),
            ("errata", Unmapped),
            ("version_access", Unmapped),
            ("extension_mechanism", Unmapped),
            ("variables", Unmapped),
            ("is_deidentified", Unmapped),
            ("is_tabular", Unmapped),
            ("citation", Copy("citation")),
        ],
    )
});

/// Look up a table by its registered name.
pub fn lookup(name: &str) -> Option<&'static MappingTable> {
    all().into_iter().find(|table| table.name() == name)
}

/// All registered tables.
pub fn all() -> [&'static MappingTable; 3] {
    [
        &DATASET_COLLECTION_TO_RELEASE,
        &DATASET_TO_SUBCRATE,
        &ROCRATE_TO_D4D,
    ]
}

//! RO-Crate / D4D Dialect Conversion Library
//!
//! This library translates dataset metadata field-by-field between the
//! dialects used in research-object packaging: D4D (Datasheets for
//! Datasets) datasheets on one side, RO-Crate metadata with Croissant
//! RAI fields on the other.
//!
//! # Overview
//!
//! Conversions are driven by declarative mapping tables. Each table
//! entry names a target field and one [`Rule`] for producing it:
//!
//! 1. Copy a source field verbatim
//! 2. Copy a source field through a scalar parser (dates, sizes,
//!    keywords, enum values)
//! 3. Build the value from the whole source document (combining or
//!    searching several fields)
//! 4. Emit a fixed constant
//! 5. Declare the field unmapped (a known dialect gap)
//!
//! The interpreter in [`apply`] walks a table against a source document
//! and emits only the fields that resolved to something; absence is the
//! uniform way of saying "nothing to report". Malformed or
//! unexpectedly-shaped source fields are normal input and degrade to
//! omission, never to an error.
//!
//! Everything is pure and synchronous: tables are immutable
//! configuration built once per process, so independent conversions can
//! run in parallel with no coordination.
//!
//! # Usage
//!
//! ```ignore
//! use rocrate_dialect::{apply, DATASET_COLLECTION_TO_RELEASE};
//!
//! let source: serde_json::Map<String, serde_json::Value> = // D4D document
//! let release = apply(&DATASET_COLLECTION_TO_RELEASE, &source);
//! ```

pub mod apply;
pub mod build;
pub mod error;
pub mod flatten;
pub mod parse;
pub mod rule;
pub mod tables;

// Re-export main types for convenience
pub use crate::apply::{apply, convert};
pub use crate::error::DialectError;
pub use crate::rule::{Builder, MappingTable, Parser, Rule};
pub use crate::tables::{
    lookup, DATASET_COLLECTION_TO_RELEASE, DATASET_TO_SUBCRATE, ROCRATE_TO_D4D,
};

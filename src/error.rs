//! Error types for dialect conversion
//!
//! The conversion engine itself never fails on malformed data; these
//! errors cover the plumbing around it (loading documents, naming
//! tables).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DialectError {
    #[error("Failed to load document from {path}: {reason}")]
    LoadError { path: String, reason: String },

    #[error("Unknown mapping table '{0}'")]
    UnknownTable(String),

    #[error("Invalid source document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

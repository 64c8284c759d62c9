//! Error types for model generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for model generation operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Model generation errors
///
/// Only catalog loading can fail; everything downstream of a loaded catalog
/// is a pure, total computation. Non-fatal conditions (unresolved reference
/// targets, unsupported field kinds, reference cycles) are reported through
/// `tracing` instead of aborting the run.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("catalog location is not readable: {path}")]
    CatalogUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no type declarations found in {path}")]
    EmptyCatalog { path: PathBuf },

    #[error("invalid type declaration in {path}: {source}")]
    InvalidDeclaration {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown type in emission plan: {0}")]
    UnknownType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

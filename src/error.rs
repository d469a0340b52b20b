//! Error types for the glyphflow library.
//!
//! The layout and rebuild core is total by design: every estimator and
//! rebuilder path has a defined fallback, so malformed or sparse input
//! degrades fidelity instead of failing. Errors only surface at the JSON
//! document-model boundary (loading and saving).

use std::io;
use thiserror::Error;

/// Result type alias for glyphflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the document-model boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing a document-model file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document model JSON could not be parsed or serialized.
    #[error("Document model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document model is structurally invalid.
    #[error("Invalid document model: {0}")]
    InvalidDocument(String),
}

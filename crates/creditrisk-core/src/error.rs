//! Error types for schema validation, artifact loading and inference.

use thiserror::Error;

/// A loan application payload does not satisfy the schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The payload is not a JSON object.
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Required columns are absent (listed in training order).
    #[error("Missing the following columns: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Columns hold arrays or objects instead of scalars.
    #[error("Columns must hold scalar values: {}", .0.join(", "))]
    InvalidFields(Vec<String>),
}

/// A model artifact could not be loaded.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported artifact format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// Inference failed for a validated application.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("could not convert string to float: '{value}' (column '{column}')")]
    NonNumeric { column: String, value: String },

    #[error("Column '{0}' is not part of the loan application")]
    UnknownColumn(String),

    #[error("Model produced a non-finite score")]
    NonFinite,
}

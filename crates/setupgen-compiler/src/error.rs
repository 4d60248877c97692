//! Compiler error types

use setupgen_parser::ParseError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// The document has no phase with the required name
    #[error("Missing phase: {0}")]
    MissingPhase(String),

    /// Action outside the supported set
    #[error("Unknown build step action: {0}")]
    UnknownAction(String),

    /// A step lacks an input its action needs
    #[error("Step '{step}' is missing input '{field}'")]
    MissingInput { step: String, field: String },

    /// A step's shape does not fit the rewrite applied to it
    #[error("Invalid step '{step}': {message}")]
    InvalidStep { step: String, message: String },

    /// Malformed object storage URI
    #[error("Invalid S3 URI: {0}")]
    InvalidS3Uri(String),

    /// A step that would compile to no code at all
    #[error("Step '{0}' produces no code")]
    EmptyStep(String),

    /// Document parsing failed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

//! Error types for Setupgen Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown build step action: {0}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

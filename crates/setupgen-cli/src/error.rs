//! Generator error types

use setupgen_compiler::CompileError;
use setupgen_parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure retrieving the component document
#[derive(Error, Debug)]
pub enum FetchError {
    /// The retrieval command could not be started
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The retrieval command exited unsuccessfully
    #[error("Command `{command}` failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The command wrote something other than UTF-8 to stdout
    #[error("Command `{command}` produced invalid UTF-8 output")]
    InvalidOutput { command: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response could not be decoded
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Generator error
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Failed to serialize {what}: {source}")]
    Dump {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for GeneratorError {
    fn from(err: config::ConfigError) -> Self {
        GeneratorError::Config(err.to_string())
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

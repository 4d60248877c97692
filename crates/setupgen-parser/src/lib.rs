//! Setupgen Parser - YAML to AST parser for ImageBuilder components
//!
//! This crate converts component documents, either as raw YAML or wrapped in
//! the JSON response of `aws imagebuilder get-component`, into the AST types
//! defined by `setupgen-core`.

pub mod component;
pub mod error;
pub mod response;
pub mod yaml_parser;

// Re-export main parser types
pub use component::ComponentParser;
pub use error::{ParseError, Result};
pub use response::{ComponentRecord, GetComponentResponse};
pub use yaml_parser::YamlParser;

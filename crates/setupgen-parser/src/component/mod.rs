//! Component parsing module
//!
//! Parses ImageBuilder component YAML into `ComponentDocument` AST nodes.

mod parser;
mod step_parser;
mod validation;

// Re-export public types
pub use parser::ComponentParser;

//! Setupgen Compiler - component AST to PowerShell compiler
//!
//! This crate turns the build phase of an ImageBuilder component into an
//! imperative PowerShell script.

pub mod codegen;
pub mod compiler;
pub mod emitter;
pub mod error;

// Re-export main types
pub use compiler::{CompilerOptions, ScriptCompiler, LOG_TARGET};
pub use emitter::{BlockKind, GeneratedScript, ScriptBlock};
pub use error::{CompileError, Result};

// Re-export codegen entry points
pub use codegen::{s3_uri_to_https_url, ConstantResolver, ResolvedConstants};

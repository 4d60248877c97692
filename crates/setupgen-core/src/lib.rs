//! Setupgen Core - Core types and definitions for the setup script generator
//!
//! This crate provides the fundamental types used across the workspace:
//! - AST definitions for ImageBuilder component documents
//! - Build step action kinds
//! - Error types

pub mod ast;
pub mod error;

// Re-export commonly used types
pub use ast::{
    Action, ComponentDocument, Constant, ConstantTable, InputEntry, LoopSpec, Phase, Step,
    StepInputs,
};
pub use error::CoreError;

//! Code generation module
//!
//! This module contains the stages that turn component AST into PowerShell:
//! constant resolution, named-step patches, step comments and per-action
//! statement generation.

pub mod action_codegen;
pub mod comments;
pub mod constants;
pub mod step_patches;

pub use action_codegen::{compile_action, s3_uri_to_https_url};
pub use comments::comment_for_step;
pub use constants::{ConstantResolver, ResolvedConstants};
pub use step_patches::{apply_step_patch, find_step_patch, StepPatch};

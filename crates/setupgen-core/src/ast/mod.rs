//! Abstract Syntax Tree (AST) definitions for ImageBuilder components
//!
//! This module contains the node definitions for:
//! - Constants and the ordered constant table
//! - Phases and build steps
//! - Step actions, inputs and loops

pub mod action;
pub mod component;
pub mod constant;
pub mod step;

pub use action::Action;
pub use component::{ComponentDocument, Phase};
pub use constant::{Constant, ConstantTable};
pub use step::{InputEntry, LoopSpec, Step, StepInputs};

//! Component document AST definitions
//!
//! An ImageBuilder component declares constants and a list of phases, each
//! with an ordered list of build steps.

use crate::ast::{ConstantTable, Step};
use serde::{Deserialize, Serialize};

/// Name of the phase whose steps are turned into a script
pub const BUILD_PHASE: &str = "build";

/// A parsed component document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "schemaVersion", skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    pub constants: ConstantTable,

    pub phases: Vec<Phase>,
}

impl ComponentDocument {
    /// Find a phase by name
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// The build phase, if the document declares one
    pub fn build_phase(&self) -> Option<&Phase> {
        self.phase(BUILD_PHASE)
    }
}

/// A named group of steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Phase {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

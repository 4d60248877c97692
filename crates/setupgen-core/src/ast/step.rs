//! Build step AST definitions
//!
//! A step names an action and carries inputs whose shape depends on that
//! action, plus an optional loop over a list of values.

use crate::ast::Action;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A single build step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step name, unique within its phase
    pub name: String,

    /// Action string as written in the document
    pub action: String,

    /// Action-specific inputs
    #[serde(default)]
    pub inputs: StepInputs,

    /// Optional loop specification
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loop_spec: Option<LoopSpec>,
}

impl Step {
    pub fn new(name: impl Into<String>, action: impl Into<String>, inputs: StepInputs) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            inputs,
            loop_spec: None,
        }
    }

    /// Builder-style helper to attach a loop
    pub fn with_loop(mut self, for_each: Vec<String>) -> Self {
        self.loop_spec = Some(LoopSpec {
            name: None,
            for_each,
        });
        self
    }

    /// Resolve the action string into a known action kind
    pub fn action_kind(&self) -> Result<Action> {
        self.action.parse()
    }

    /// Values the step iterates over, if it has a loop
    pub fn loop_values(&self) -> Option<&[String]> {
        self.loop_spec.as_ref().map(|l| l.for_each.as_slice())
    }
}

/// Step inputs, shaped by the step's action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepInputs {
    /// No inputs
    #[default]
    None,

    /// A command list (`inputs: { commands: [...] }`)
    Commands { commands: Vec<String> },

    /// A list of input objects
    Entries(Vec<InputEntry>),

    /// Any other shape, kept verbatim
    Raw(serde_json::Value),
}

impl StepInputs {
    pub fn commands(&self) -> Option<&[String]> {
        match self {
            StepInputs::Commands { commands } => Some(commands),
            _ => None,
        }
    }

    pub fn commands_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            StepInputs::Commands { commands } => Some(commands),
            _ => None,
        }
    }

    pub fn entries(&self) -> Option<&[InputEntry]> {
        match self {
            StepInputs::Entries(entries) => Some(entries),
            _ => None,
        }
    }
}

/// One entry of a list-shaped input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl InputEntry {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn transfer(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            destination: Some(destination.into()),
            ..Default::default()
        }
    }
}

/// Loop specification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "forEach")]
    pub for_each: Vec<String>,
}

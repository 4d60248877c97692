//! Build step actions for ImageBuilder components

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action kinds a build step can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Create one or more directories
    CreateFolder,
    /// Recursively delete directories
    DeleteFolder,
    /// Move files into place
    MoveFile,
    /// Download objects from S3
    S3Download,
    /// Run PowerShell commands
    ExecutePowerShell,
    /// Reboot the instance
    Reboot,
}

impl Action {
    /// All known actions, in document order
    pub const ALL: [Action; 6] = [
        Action::CreateFolder,
        Action::DeleteFolder,
        Action::MoveFile,
        Action::S3Download,
        Action::ExecutePowerShell,
        Action::Reboot,
    ];

    /// The spelling used by the component document
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateFolder => "CreateFolder",
            Action::DeleteFolder => "DeleteFolder",
            Action::MoveFile => "MoveFile",
            Action::S3Download => "S3Download",
            Action::ExecutePowerShell => "ExecutePowerShell",
            Action::Reboot => "Reboot",
        }
    }

    /// Returns true if the action produces no script output
    pub fn is_ignored(&self) -> bool {
        matches!(self, Action::Reboot)
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| CoreError::UnknownAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

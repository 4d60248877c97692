//! Setupgen CLI library
//!
//! Retrieves the Amazon EKS Optimized Windows AMI ImageBuilder component and
//! writes the PowerShell setup script compiled from its build phase.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod generator;

pub use cli::Cli;
pub use config::GeneratorConfig;
pub use error::{FetchError, GeneratorError, Result};
pub use fetcher::{AwsCliSource, ComponentSource, FileSource};
pub use generator::Generator;

//! Generator configuration

use crate::cli::Cli;
use crate::error::Result;
use setupgen_compiler::LOG_TARGET;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configuration file, without extension
pub const DEFAULT_CONFIG_FILE: &str = "config/setupgen";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Region the component is retrieved from
    pub region: String,

    /// Build version ARN of the component
    pub component_arn: String,

    /// AWS CLI executable
    pub aws_program: String,

    /// Read the component from this file instead of calling the AWS CLI
    pub input_path: Option<PathBuf>,

    /// Where the generated script is written
    pub output_path: PathBuf,

    /// Print the parsed constants and build steps as JSON to stdout
    pub dump_document: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            component_arn:
                "arn:aws:imagebuilder:us-east-1:aws:component/eks-optimized-ami-windows/1.24.0"
                    .to_string(),
            aws_program: "aws".to_string(),
            input_path: None,
            output_path: PathBuf::from("scripts/setup.ps1"),
            dump_document: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables and the default config file
    ///
    /// The default file is optional. If it is missing or unusable, the
    /// defaults are used.
    pub fn load() -> Result<Self> {
        match Self::load_with(DEFAULT_CONFIG_FILE, false) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::info!(
                    target: LOG_TARGET,
                    "No usable config file ({}), using default configuration",
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from environment variables and an explicit config file
    ///
    /// `file` may omit its extension. The file must exist and parse.
    /// `SETUPGEN_*` variables take precedence over the file.
    pub fn load_from(file: &str) -> Result<Self> {
        Self::load_with(file, true)
    }

    fn load_with(file: &str, required: bool) -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(file).required(required))
            .add_source(config::Environment::with_prefix("SETUPGEN"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Apply command line overrides
    pub fn apply_args(&mut self, args: &Cli) {
        if let Some(region) = &args.region {
            self.region = region.clone();
        }
        if let Some(arn) = &args.component_arn {
            self.component_arn = arn.clone();
        }
        if let Some(program) = &args.aws_program {
            self.aws_program = program.clone();
        }
        if let Some(input) = &args.input {
            self.input_path = Some(input.clone());
        }
        if let Some(output) = &args.output {
            self.output_path = output.clone();
        }
        if args.dump {
            self.dump_document = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneratorError;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();

        assert_eq!(config.region, "us-east-1");
        assert!(config.component_arn.ends_with("/eks-optimized-ami-windows/1.24.0"));
        assert_eq!(config.aws_program, "aws");
        assert!(config.input_path.is_none());
        assert_eq!(config.output_path, PathBuf::from("scripts/setup.ps1"));
        assert!(!config.dump_document);
    }

    #[test]
    fn test_apply_args() {
        let args = Cli::parse_from([
            "setupgen",
            "--region",
            "eu-west-1",
            "--input",
            "component.yaml",
            "--output",
            "out/setup.ps1",
            "--dump",
        ]);

        let mut config = GeneratorConfig::default();
        config.apply_args(&args);

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.input_path, Some(PathBuf::from("component.yaml")));
        assert_eq!(config.output_path, PathBuf::from("out/setup.ps1"));
        assert!(config.dump_document);
        assert_eq!(config.aws_program, "aws");
    }

    #[test]
    fn test_load_from_file_with_partial_settings() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "region = \"ap-southeast-2\"").unwrap();
        writeln!(file, "output_path = \"generated/setup.ps1\"").unwrap();

        let config = GeneratorConfig::load_from(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.region, "ap-southeast-2");
        assert_eq!(config.output_path, PathBuf::from("generated/setup.ps1"));
        assert_eq!(config.aws_program, "aws");
    }

    #[test]
    fn test_optional_missing_file_uses_defaults() {
        let config = GeneratorConfig::load_with("does/not/exist/setupgen", false).unwrap();
        assert_eq!(config.output_path, GeneratorConfig::default().output_path);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = GeneratorConfig::load_from("/nonexistent/typo.toml").unwrap_err();
        assert!(matches!(err, GeneratorError::Config(_)));
    }

    #[test]
    fn test_load_from_malformed_file_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "region = [unclosed").unwrap();

        let err = GeneratorConfig::load_from(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, GeneratorError::Config(_)));
    }
}

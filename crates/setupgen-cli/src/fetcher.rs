//! Component retrieval
//!
//! The AWS CLI source asks ImageBuilder for the component and hands back its
//! YAML document. The file source hands back a saved copy as is, which may be
//! the YAML document or a whole `get-component` response.

use crate::config::GeneratorConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use setupgen_compiler::LOG_TARGET;
use setupgen_parser::GetComponentResponse;
use std::path::PathBuf;

/// Where the component document comes from
#[async_trait]
pub trait ComponentSource: Send + Sync {
    /// Retrieve the component, as its YAML document or a `get-component` response
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Human-readable description for log messages
    fn describe(&self) -> String;
}

/// Retrieves the component with `aws imagebuilder get-component`
#[derive(Debug, Clone)]
pub struct AwsCliSource {
    pub program: String,
    pub region: String,
    pub component_arn: String,
}

impl AwsCliSource {
    pub fn new(
        program: impl Into<String>,
        region: impl Into<String>,
        component_arn: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            region: region.into(),
            component_arn: component_arn.into(),
        }
    }

    /// Arguments passed to the AWS CLI
    pub fn args(&self) -> Vec<String> {
        vec![
            "imagebuilder".to_string(),
            "get-component".to_string(),
            format!("--region={}", self.region),
            "--component-build-version-arn".to_string(),
            self.component_arn.clone(),
        ]
    }

    /// Full command line, for logging
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl ComponentSource for AwsCliSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let command = self.command_line();
        tracing::info!(target: LOG_TARGET, "{}", command);

        let output = tokio::process::Command::new(&self.program)
            .args(self.args())
            .output()
            .await
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| FetchError::InvalidOutput { command })?;
        let response = GetComponentResponse::from_json(&stdout)?;

        tracing::debug!(
            target: LOG_TARGET,
            component = %response.component.describe(),
            "Retrieved component"
        );

        Ok(response.component.data)
    }

    fn describe(&self) -> String {
        self.component_arn.clone()
    }
}

/// Reads the component from a local file
///
/// The file may hold either the raw YAML document or a saved
/// `get-component` response.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ComponentSource for FileSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        tracing::info!(target: LOG_TARGET, "Reading component from {}", self.path.display());

        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the source selected by the configuration
pub fn source_for(config: &GeneratorConfig) -> Box<dyn ComponentSource> {
    match &config.input_path {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(AwsCliSource::new(
            config.aws_program.clone(),
            config.region.clone(),
            config.component_arn.clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_aws_command_line() {
        let source = AwsCliSource::new(
            "aws",
            "us-east-1",
            "arn:aws:imagebuilder:us-east-1:aws:component/eks-optimized-ami-windows/1.24.0",
        );

        assert_eq!(
            source.command_line(),
            "aws imagebuilder get-component --region=us-east-1 --component-build-version-arn arn:aws:imagebuilder:us-east-1:aws:component/eks-optimized-ami-windows/1.24.0"
        );
    }

    #[test]
    fn test_source_for_config() {
        let config = GeneratorConfig::default();
        assert_eq!(source_for(&config).describe(), config.component_arn);

        let config = GeneratorConfig {
            input_path: Some(PathBuf::from("component.yaml")),
            ..Default::default()
        };
        assert_eq!(source_for(&config).describe(), "component.yaml");
    }

    #[tokio::test]
    async fn test_missing_program_fails() {
        let source = AwsCliSource::new("setupgen-no-such-program", "us-east-1", "arn");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_file_source_keeps_response_for_parser() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "component": {
                "name": "test",
                "data": "constants: []\nphases:\n  - name: build\n    steps: []\n"
            }
        });
        write!(file, "{}", json).unwrap();

        let data = FileSource::new(file.path()).fetch().await.unwrap();
        assert!(data.starts_with('{'));

        let document = setupgen_parser::ComponentParser::parse_any(&data).unwrap();
        assert!(document.build_phase().is_some());
    }

    #[tokio::test]
    async fn test_file_source_reads_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "phases:\n  - name: build\n").unwrap();

        let data = FileSource::new(file.path()).fetch().await.unwrap();
        assert!(data.starts_with("phases:"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let err = FileSource::new("/nonexistent/component.yaml")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Read { .. }));
    }
}

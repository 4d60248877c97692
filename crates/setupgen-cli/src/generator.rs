//! Generation pipeline
//!
//! Fetches the component, compiles its build phase and writes the script.
//! The output file is only touched once compilation has succeeded.

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::fetcher::{source_for, ComponentSource};
use setupgen_compiler::{GeneratedScript, ScriptCompiler, LOG_TARGET};
use serde::{Serialize, Serializer};
use setupgen_core::ast::{ComponentDocument, ConstantTable};
use setupgen_parser::ComponentParser;
use std::path::{Path, PathBuf};

/// Setup script generator
pub struct Generator {
    config: GeneratorConfig,
    source: Box<dyn ComponentSource>,
    compiler: ScriptCompiler,
}

impl Generator {
    /// Create a generator using the source selected by the configuration
    pub fn new(config: GeneratorConfig) -> Self {
        let source = source_for(&config);
        Self::with_source(config, source)
    }

    /// Create a generator reading from a custom source
    pub fn with_source(config: GeneratorConfig, source: Box<dyn ComponentSource>) -> Self {
        Self {
            config,
            source,
            compiler: ScriptCompiler::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the whole pipeline and return the path of the written script
    pub async fn run(&self) -> Result<PathBuf> {
        tracing::debug!(target: LOG_TARGET, source = %self.source.describe(), "Fetching component");
        let data = self.source.fetch().await?;
        let document = ComponentParser::parse_any(&data)?;

        if self.config.dump_document {
            println!("{}", dump_document(&document)?);
        }

        let script = self.compiler.compile(&document)?;
        write_script(&self.config.output_path, &script).await?;

        tracing::info!(
            target: LOG_TARGET,
            "Wrote generated code to {}",
            self.config.output_path.display()
        );

        Ok(self.config.output_path.clone())
    }
}

/// Constants as a `name: value` object, in declaration order
struct ConstantMap<'a>(&'a ConstantTable);

impl Serialize for ConstantMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|c| (&c.name, &c.value)))
    }
}

/// Render the parsed constants and build steps for inspection
pub fn dump_document(document: &ComponentDocument) -> Result<String> {
    let constants = serde_json::to_string_pretty(&ConstantMap(&document.constants))
        .map_err(|source| GeneratorError::Dump {
            what: "constants",
            source,
        })?;

    let steps = document
        .build_phase()
        .map(|phase| phase.steps.as_slice())
        .unwrap_or_default();
    let steps = serde_json::to_string_pretty(steps).map_err(|source| GeneratorError::Dump {
        what: "build steps",
        source,
    })?;

    Ok(format!("CONSTANTS:\n{}\n\nBUILD STEPS:\n{}", constants, steps))
}

async fn write_script(path: &Path, script: &GeneratedScript) -> Result<()> {
    let write_error = |source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    tokio::fs::write(path, script.render())
        .await
        .map_err(write_error)
}

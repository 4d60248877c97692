//! Main compiler
//!
//! Drives the three stages over a component document: constant resolution,
//! named-step patches with comments, and per-action code generation.

use crate::codegen::{apply_step_patch, comment_for_step, compile_action, ConstantResolver};
use crate::emitter::{BlockKind, GeneratedScript};
use crate::error::{CompileError, Result};
use setupgen_core::ast::component::BUILD_PHASE;
use setupgen_core::ast::{Action, ComponentDocument, ConstantTable, Step};
use setupgen_parser::ComponentParser;

/// Log target shared by every diagnostic the generator writes
pub const LOG_TARGET: &str = "setupgen";

/// Compiler options
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Emit the banner, fail-fast directive and helper functions
    pub include_header: bool,
    /// Apply the named-step patches before code generation
    pub apply_step_patches: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            apply_step_patches: true,
        }
    }
}

/// Compiles a component's build phase into a PowerShell script
#[derive(Debug, Clone, Default)]
pub struct ScriptCompiler {
    options: CompilerOptions,
}

impl ScriptCompiler {
    /// Create a new compiler instance with default options
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Create a new compiler instance with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Parse and compile a component YAML document
    pub fn compile_yaml(&self, yaml: &str) -> Result<GeneratedScript> {
        let document = ComponentParser::parse(yaml)?;
        self.compile(&document)
    }

    /// Compile a component document
    ///
    /// Any error aborts the whole compilation; no partial script is returned.
    pub fn compile(&self, document: &ComponentDocument) -> Result<GeneratedScript> {
        let phase = document
            .build_phase()
            .ok_or_else(|| CompileError::MissingPhase(BUILD_PHASE.to_string()))?;

        let mut script = GeneratedScript::new();
        if self.options.include_header {
            script.push_header();
        }

        let resolved = ConstantResolver::resolve(&document.constants);
        script.push_constants(resolved.declarations);

        for step in &phase.steps {
            self.compile_step(step.clone(), &resolved.table, &mut script)?;
        }

        tracing::debug!(
            target: LOG_TARGET,
            steps = phase.steps.len(),
            lines = script.line_count(),
            "Compiled build phase"
        );

        Ok(script)
    }

    fn compile_step(
        &self,
        mut step: Step,
        constants: &ConstantTable,
        script: &mut GeneratedScript,
    ) -> Result<()> {
        let action: Action = step
            .action_kind()
            .map_err(|_| CompileError::UnknownAction(step.action.clone()))?;

        if action.is_ignored() {
            tracing::info!(target: LOG_TARGET, step = %step.name, "Ignoring reboot step.");
            return Ok(());
        }

        tracing::debug!(target: LOG_TARGET, step = %step.name, action = %action, "Compiling step");

        if self.options.apply_step_patches {
            let injected = apply_step_patch(&mut step)?;
            script.push_step_block(BlockKind::Injected, &step.name, injected);
        }

        if let Some(comment) = comment_for_step(&step.name) {
            let lines = comment.iter().map(|l| l.to_string()).collect();
            script.push_step_block(BlockKind::Comment, &step.name, lines);
        }

        let code = compile_action(action, &step, constants)?;
        if code.is_empty() {
            return Err(CompileError::EmptyStep(step.name));
        }
        script.push_step_block(BlockKind::StepCode, &step.name, code);
        script.push_separator(&step.name);

        Ok(())
    }
}

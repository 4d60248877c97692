//! Script emitter
//!
//! The generated script is kept as an ordered list of blocks so callers and
//! tests can inspect what each step produced before it is rendered to text.

use std::fmt;

/// Fixed banner, fail-fast directive and helper functions
const HEADER: &[&str] = &[
    "<#",
    "\tTHIS FILE IS AUTOMATICALLY GENERATED, DO NOT EDIT!",
    "\t",
    "\tThis script is based on the logic from the \"Amazon EKS Optimized Windows AMI\"",
    "\tEC2 ImageBuilder component, with modifications to use containerd 1.7.0.",
    "\t",
    "\tThe original ImageBuilder component logic is Copyright Amazon.com, Inc. or",
    "\tits affiliates, and is licensed under the MIT License.",
    "#>",
    "",
    "# Halt execution if we encounter an error",
    "$ErrorActionPreference = 'Stop'",
    "",
    "",
    "# Applies in-place patches to a file",
    "function PatchFile",
    "{",
    "\tParam (",
    "\t\t$File,",
    "\t\t$Patches",
    "\t)",
    "\t",
    "\t$patched = Get-Content -Path $File -Raw",
    "\t$Patches.GetEnumerator() | ForEach-Object {",
    "\t\t$patched = $patched.Replace($_.Key, $_.Value)",
    "\t}",
    "\tSet-Content -Path $File -Value $patched -NoNewline",
    "}",
    "",
    "",
];

/// What a block of lines represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Header,
    Constants,
    /// Literal code injected ahead of a step
    Injected,
    Comment,
    StepCode,
    /// Blank line closing a step
    Separator,
}

/// A run of lines in the generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    pub kind: BlockKind,

    /// Step the block belongs to, if any
    pub step: Option<String>,

    pub lines: Vec<String>,
}

/// Generated PowerShell script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedScript {
    blocks: Vec<ScriptBlock>,
}

impl GeneratedScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the fixed header
    pub fn push_header(&mut self) {
        self.blocks.push(ScriptBlock {
            kind: BlockKind::Header,
            step: None,
            lines: HEADER.iter().map(|l| l.to_string()).collect(),
        });
    }

    /// Append the constant declarations under their heading
    pub fn push_constants(&mut self, declarations: Vec<String>) {
        let mut lines = Vec::with_capacity(declarations.len() + 2);
        lines.push("# Constants".to_string());
        lines.extend(declarations);
        lines.push(String::new());

        self.blocks.push(ScriptBlock {
            kind: BlockKind::Constants,
            step: None,
            lines,
        });
    }

    /// Append a block of lines produced for a step
    ///
    /// Empty blocks are dropped.
    pub fn push_step_block(&mut self, kind: BlockKind, step: &str, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }

        self.blocks.push(ScriptBlock {
            kind,
            step: Some(step.to_string()),
            lines,
        });
    }

    /// Close a step with a single blank line
    pub fn push_separator(&mut self, step: &str) {
        self.blocks.push(ScriptBlock {
            kind: BlockKind::Separator,
            step: Some(step.to_string()),
            lines: vec![String::new()],
        });
    }

    pub fn blocks(&self) -> &[ScriptBlock] {
        &self.blocks
    }

    /// All lines in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter().map(String::as_str))
    }

    /// Lines emitted for one step, including its comment and separator
    pub fn step_lines(&self, step: &str) -> Vec<&str> {
        self.blocks
            .iter()
            .filter(|b| b.step.as_deref() == Some(step))
            .flat_map(|b| b.lines.iter().map(String::as_str))
            .collect()
    }

    /// Lines of all blocks of one kind
    pub fn lines_of(&self, kind: BlockKind) -> Vec<&str> {
        self.blocks
            .iter()
            .filter(|b| b.kind == kind)
            .flat_map(|b| b.lines.iter().map(String::as_str))
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }

    /// Render the script, each line terminated by a newline
    pub fn render(&self) -> String {
        let mut output = String::new();
        for line in self.lines() {
            output.push_str(line);
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for GeneratedScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

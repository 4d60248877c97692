//! Constant resolution
//!
//! Turns the component's constants into PowerShell variable declarations.
//! Each value is rewritten to reference constants declared before it, so a
//! declaration never refers forward.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use setupgen_core::ast::{Constant, ConstantTable};

/// Name of the synthetic parent directory constant
pub const TEMP_ROOT: &str = "TempRoot";

/// Value of the synthetic parent directory constant
pub const TEMP_ROOT_VALUE: &str = r"C:\TempEKSArtifactDir";

/// Constant declared right after the synthetic one, always last
pub const TEMP_PATH: &str = "TempPath";

/// Hard-coded system roots and their environment variable forms
const SYSTEM_PATHS: &[(&str, &str)] = &[
    (r"C:\Program Files", "$env:ProgramFiles"),
    (r"C:\ProgramData", "$env:ProgramData"),
];

/// `{{ name }}` references in component values
static TEMPLATE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{ (.+?) \}\}").expect("Valid regex pattern"));

/// Constants after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConstants {
    /// Final table, including the synthetic constant
    pub table: ConstantTable,

    /// One `$Name = "value"` statement per constant, in declaration order
    pub declarations: Vec<String>,
}

/// Constant resolver
pub struct ConstantResolver;

impl ConstantResolver {
    /// Resolve a document's constants into the final table and declarations
    pub fn resolve(raw: &ConstantTable) -> ResolvedConstants {
        let table = Self::with_synthetic(raw);
        let declarations = Self::declarations(&table);
        ResolvedConstants {
            table,
            declarations,
        }
    }

    /// Copy of `raw` with the synthetic temp root added
    ///
    /// The temp path constant moves to the end of the table, right after the
    /// temp root. Every other constant keeps its relative order.
    pub fn with_synthetic(raw: &ConstantTable) -> ConstantTable {
        let mut table = raw.clone();
        let temp_path = table.remove(TEMP_PATH);

        table.insert(Constant::new(TEMP_ROOT, TEMP_ROOT_VALUE));
        if let Some(temp_path) = temp_path {
            table.insert(temp_path);
        }
        table
    }

    /// Render declarations, substituting only constants declared earlier
    pub fn declarations(table: &ConstantTable) -> Vec<String> {
        let mut declared = ConstantTable::new();
        let mut declarations = Vec::with_capacity(table.len());

        for constant in table {
            let transformed = Self::rewrite_value(&constant.value, &declared);
            let transformed = Self::replace_system_paths(&transformed);
            declarations.push(format!("${} = \"{}\"", constant.name, transformed));
            declared.insert(constant.clone());
        }

        declarations
    }

    /// Rewrite a value to reference constants
    ///
    /// Every literal occurrence of a known constant's value becomes a
    /// `$Name` reference, applied in declaration order, then `{{ name }}`
    /// becomes `$name`. Constants with empty values are skipped.
    pub fn rewrite_value<'a, I>(value: &str, constants: I) -> String
    where
        I: IntoIterator<Item = &'a Constant>,
    {
        let mut transformed = value.to_string();
        for constant in constants {
            if constant.value.is_empty() {
                continue;
            }
            transformed = transformed.replace(&constant.value, &format!("${}", constant.name));
        }

        TEMPLATE_REFERENCE
            .replace_all(&transformed, |caps: &Captures| format!("${}", &caps[1]))
            .into_owned()
    }

    /// Replace hard-coded system roots with environment variables
    pub fn replace_system_paths(path: &str) -> String {
        SYSTEM_PATHS
            .iter()
            .fold(path.to_string(), |acc, (root, env)| acc.replace(root, env))
    }
}

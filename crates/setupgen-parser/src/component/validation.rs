//! Component field validation
//!
//! Known fields for each level of a component document. Unknown fields are
//! reported as warnings only, since the service accepts fields this tool
//! has no use for.

/// Top-level document fields
pub(super) const DOCUMENT_FIELDS: &[&str] = &[
    "name",
    "description",
    "schemaVersion",
    "constants",
    "parameters",
    "phases",
];

/// Phase fields
pub(super) const PHASE_FIELDS: &[&str] = &["name", "steps"];

/// Step fields
pub(super) const STEP_FIELDS: &[&str] = &[
    "name",
    "action",
    "inputs",
    "loop",
    "onFailure",
    "maxAttempts",
    "timeoutSeconds",
    "if",
];

/// Loop fields
pub(super) const LOOP_FIELDS: &[&str] = &["name", "forEach", "for"];

//! Unit tests for AST types
//!
//! Tests the component data structures shared by the parser and compiler.

use setupgen_core::ast::*;
use setupgen_core::CoreError;

// =============================================================================
// Constant Table Tests
// =============================================================================

#[test]
fn test_constant_table_from_iter_and_lookup() {
    let table: ConstantTable = vec![
        Constant::new("EKSArtifactDir", "C:\\Program Files\\Amazon\\EKS"),
        Constant::new("TempPath", "C:\\TempEKSArtifactDir\\temp"),
    ]
    .into_iter()
    .collect();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("TempPath"), Some("C:\\TempEKSArtifactDir\\temp"));
    assert!(table.get("Missing").is_none());
    assert_eq!(table.position("TempPath"), Some(1));
}

#[test]
fn test_constant_table_serializes_as_list() {
    let mut table = ConstantTable::new();
    table.insert(Constant::new("A", "1"));
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json[0]["name"], "A");
    assert_eq!(json[0]["value"], "1");
}

#[test]
fn test_constant_table_iteration_order() {
    let mut table = ConstantTable::new();
    table.insert(Constant::new("Z", "z"));
    table.insert(Constant::new("A", "a"));

    let names: Vec<&str> = (&table).into_iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Z", "A"]);
}

// =============================================================================
// Step Tests
// =============================================================================

#[test]
fn test_step_inputs_default_is_none() {
    let step: Step = serde_json::from_str(r#"{"name": "Restart", "action": "Reboot"}"#).unwrap();
    assert_eq!(step.inputs, StepInputs::None);
    assert!(step.loop_spec.is_none());
}

#[test]
fn test_step_inputs_shapes_deserialize() {
    let commands: StepInputs =
        serde_json::from_str(r#"{"commands": ["Write-Host 'hi'"]}"#).unwrap();
    assert_eq!(commands.commands().unwrap(), ["Write-Host 'hi'"]);

    let entries: StepInputs =
        serde_json::from_str(r#"[{"source": "s3://b/k", "destination": "C:\\k"}]"#).unwrap();
    let entry = &entries.entries().unwrap()[0];
    assert_eq!(entry.source.as_deref(), Some("s3://b/k"));
    assert_eq!(entry.destination.as_deref(), Some("C:\\k"));

    let raw: StepInputs = serde_json::from_str(r#"{"delaySeconds": 60}"#).unwrap();
    assert!(matches!(raw, StepInputs::Raw(_)));
}

#[test]
fn test_unknown_action_is_reported_by_name() {
    let step = Step::new("Wipe", "FormatDisk", StepInputs::None);
    match step.action_kind() {
        Err(CoreError::UnknownAction(action)) => assert_eq!(action, "FormatDisk"),
        other => panic!("Expected unknown action error, got {:?}", other),
    }
}

#[test]
fn test_all_actions_have_distinct_spellings() {
    let mut spellings: Vec<&str> = Action::ALL.iter().map(|a| a.as_str()).collect();
    spellings.sort();
    spellings.dedup();
    assert_eq!(spellings.len(), Action::ALL.len());
}

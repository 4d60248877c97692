//! Build step parsing
//!
//! Parses steps, their inputs and their loops from YAML format.

use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use super::validation::{LOOP_FIELDS, STEP_FIELDS};
use setupgen_core::ast::{InputEntry, LoopSpec, Step, StepInputs};
use serde_yaml::Value as YamlValue;

/// Parse a single build step
pub(super) fn parse_step(yaml: &YamlValue) -> Result<Step> {
    let name = YamlParser::get_string(yaml, "name")?;
    let action = YamlParser::get_string(yaml, "action").map_err(|_| ParseError::MissingField {
        field: format!("{}.action", name),
    })?;

    YamlParser::warn_unknown_fields(yaml, STEP_FIELDS, &format!("step '{}'", name));

    let inputs = parse_inputs(yaml.get("inputs"), &name)?;

    let loop_spec = match yaml.get("loop") {
        Some(loop_obj) if !loop_obj.is_null() => Some(parse_loop(loop_obj, &name)?),
        _ => None,
    };

    Ok(Step {
        name,
        action,
        inputs,
        loop_spec,
    })
}

/// Parse step inputs into the shape that matches them
pub(super) fn parse_inputs(inputs: Option<&YamlValue>, step_name: &str) -> Result<StepInputs> {
    let inputs = match inputs {
        None | Some(YamlValue::Null) => return Ok(StepInputs::None),
        Some(inputs) => inputs,
    };

    if let Some(commands) = YamlParser::get_optional_array(inputs, "commands") {
        let commands =
            YamlParser::string_list(commands, &format!("{}.inputs.commands", step_name))?;
        return Ok(StepInputs::Commands { commands });
    }

    if let Some(items) = inputs.as_sequence() {
        if items.iter().all(|item| item.is_mapping()) {
            let entries = items.iter().map(parse_input_entry).collect();
            return Ok(StepInputs::Entries(entries));
        }
    }

    let raw = serde_yaml::from_value::<serde_json::Value>(inputs.clone())?;
    Ok(StepInputs::Raw(raw))
}

fn parse_input_entry(item: &YamlValue) -> InputEntry {
    InputEntry {
        path: YamlParser::get_optional_string(item, "path"),
        source: YamlParser::get_optional_string(item, "source"),
        destination: YamlParser::get_optional_string(item, "destination"),
    }
}

/// Parse a loop specification
pub(super) fn parse_loop(loop_obj: &YamlValue, step_name: &str) -> Result<LoopSpec> {
    let context = format!("{}.loop", step_name);
    YamlParser::warn_unknown_fields(loop_obj, LOOP_FIELDS, &context);

    let name = YamlParser::get_optional_string(loop_obj, "name");

    let for_each = match loop_obj.get("forEach") {
        Some(YamlValue::Sequence(values)) => {
            YamlParser::string_list(values, &format!("{}.forEach", context))?
        }
        Some(other) => {
            return Err(ParseError::InvalidValue {
                field: format!("{}.forEach", context),
                message: format!("expected a list, got {}", YamlParser::kind(other)),
            })
        }
        None => Vec::new(),
    };

    Ok(LoopSpec { name, for_each })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> YamlValue {
        YamlParser::parse(s).unwrap()
    }

    #[test]
    fn test_parse_command_step() {
        let step = parse_step(&yaml(
            r#"
name: InstallContainers
action: ExecutePowerShell
inputs:
  commands:
    - "$ErrorActionPreference = 'Stop'"
    - Install-WindowsFeature -Name Containers
"#,
        ))
        .unwrap();

        assert_eq!(step.name, "InstallContainers");
        assert_eq!(step.action, "ExecutePowerShell");
        assert_eq!(step.inputs.commands().unwrap().len(), 2);
        assert!(step.loop_spec.is_none());
    }

    #[test]
    fn test_parse_entries_step() {
        let step = parse_step(&yaml(
            r#"
name: MoveEKSArtifacts
action: MoveFile
inputs:
  - source: C:\TempEKSArtifactDir\a.exe
    destination: '{{ EKSArtifactDir }}\a.exe'
  - source: C:\TempEKSArtifactDir\b.exe
    destination: '{{ EKSArtifactDir }}\b.exe'
"#,
        ))
        .unwrap();

        let entries = step.inputs.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source.as_deref(), Some("C:\\TempEKSArtifactDir\\a.exe"));
        assert_eq!(
            entries[1].destination.as_deref(),
            Some("{{ EKSArtifactDir }}\\b.exe")
        );
    }

    #[test]
    fn test_parse_loop_step() {
        let step = parse_step(&yaml(
            r#"
name: ConfigureDirectories
action: CreateFolder
loop:
  name: Dirs
  forEach:
    - '{{ EKSArtifactDir }}'
    - '{{ TempPath }}'
inputs:
  - path: '{{ loop.value }}'
"#,
        ))
        .unwrap();

        let spec = step.loop_spec.unwrap();
        assert_eq!(spec.name.as_deref(), Some("Dirs"));
        assert_eq!(spec.for_each, vec!["{{ EKSArtifactDir }}", "{{ TempPath }}"]);
    }

    #[test]
    fn test_parse_reboot_step_keeps_raw_inputs() {
        let step = parse_step(&yaml(
            r#"
name: RebootStep
action: Reboot
inputs:
  delaySeconds: 60
"#,
        ))
        .unwrap();

        match step.inputs {
            StepInputs::Raw(value) => assert_eq!(value["delaySeconds"], 60),
            other => panic!("Expected raw inputs, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_step_missing_action() {
        let err = parse_step(&yaml("name: Broken")).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: Broken.action");
    }

    #[test]
    fn test_parse_loop_rejects_non_list() {
        let err = parse_loop(&yaml("forEach: {start: 1, end: 3}"), "Counter").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
        assert!(err.to_string().contains("Counter.loop.forEach"));
    }

    #[test]
    fn test_parse_inputs_absent() {
        assert_eq!(parse_inputs(None, "x").unwrap(), StepInputs::None);
        assert_eq!(parse_inputs(Some(&YamlValue::Null), "x").unwrap(), StepInputs::None);
    }
}

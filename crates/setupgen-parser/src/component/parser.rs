//! Core component parser implementation
//!
//! Parses ImageBuilder component documents into `ComponentDocument` AST nodes.

use crate::error::{ParseError, Result};
use crate::response::GetComponentResponse;
use crate::yaml_parser::YamlParser;
use super::step_parser::parse_step;
use super::validation::{DOCUMENT_FIELDS, PHASE_FIELDS};
use setupgen_core::ast::{ComponentDocument, Constant, ConstantTable, Phase};
use serde_yaml::Value as YamlValue;

/// Component parser
pub struct ComponentParser;

impl ComponentParser {
    /// Parse a component from its YAML document
    pub fn parse(yaml_str: &str) -> Result<ComponentDocument> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse a component from a `get-component` JSON response
    pub fn parse_response(json_str: &str) -> Result<ComponentDocument> {
        let response = GetComponentResponse::from_json(json_str)?;
        log::debug!(
            "Parsing component data for {}",
            response.component.describe()
        );
        Self::parse(&response.component.data)
    }

    /// Parse either a `get-component` JSON response or a raw YAML document
    pub fn parse_any(content: &str) -> Result<ComponentDocument> {
        if content.trim_start().starts_with('{') {
            if let Ok(response) = GetComponentResponse::from_json(content) {
                return Self::parse(&response.component.data);
            }
        }
        Self::parse(content)
    }

    /// Parse a component from YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<ComponentDocument> {
        if !yaml.is_mapping() {
            return Err(ParseError::InvalidValue {
                field: "document".to_string(),
                message: format!("expected a mapping, got {}", YamlParser::kind(yaml)),
            });
        }

        YamlParser::warn_unknown_fields(yaml, DOCUMENT_FIELDS, "component");

        let name = YamlParser::get_optional_string(yaml, "name");
        let description = YamlParser::get_optional_string(yaml, "description");
        let schema_version = YamlParser::get_optional_string(yaml, "schemaVersion");

        let constants = match YamlParser::get_optional_array(yaml, "constants") {
            Some(entries) => Self::parse_constants(entries)?,
            None => ConstantTable::new(),
        };

        let phases = YamlParser::get_array(yaml, "phases")?
            .iter()
            .map(Self::parse_phase)
            .collect::<Result<Vec<_>>>()?;

        Ok(ComponentDocument {
            name,
            description,
            schema_version,
            constants,
            phases,
        })
    }

    /// Parse the constants list
    ///
    /// Each entry is a mapping from constant name to `{type, value}`. Every
    /// key of every entry is taken, in document order.
    pub fn parse_constants(entries: &[YamlValue]) -> Result<ConstantTable> {
        let mut table = ConstantTable::new();

        for entry in entries {
            let mapping = entry.as_mapping().ok_or_else(|| ParseError::InvalidValue {
                field: "constants".to_string(),
                message: format!(
                    "expected a mapping of name to value, got {}",
                    YamlParser::kind(entry)
                ),
            })?;

            for (key, values) in mapping {
                let name = YamlParser::scalar_to_string(key).ok_or_else(|| {
                    ParseError::InvalidValue {
                        field: "constants".to_string(),
                        message: format!("constant name must be a string, got {}", YamlParser::kind(key)),
                    }
                })?;

                let value = YamlParser::get_optional_string(values, "value").ok_or_else(|| {
                    ParseError::MissingField {
                        field: format!("constants.{}.value", name),
                    }
                })?;

                table.insert(Constant::new(name, value));
            }
        }

        Ok(table)
    }

    fn parse_phase(yaml: &YamlValue) -> Result<Phase> {
        let name = YamlParser::get_string(yaml, "name").map_err(|_| ParseError::MissingField {
            field: "phases.name".to_string(),
        })?;

        YamlParser::warn_unknown_fields(yaml, PHASE_FIELDS, &format!("phase '{}'", name));

        let steps = match yaml.get("steps") {
            Some(YamlValue::Sequence(steps)) => steps
                .iter()
                .map(parse_step)
                .collect::<Result<Vec<_>>>()?,
            Some(YamlValue::Null) | None => Vec::new(),
            Some(other) => {
                return Err(ParseError::InvalidValue {
                    field: format!("{}.steps", name),
                    message: format!("expected a list, got {}", YamlParser::kind(other)),
                })
            }
        };

        Ok(Phase { name, steps })
    }
}

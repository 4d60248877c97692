//! YAML Parser
//!
//! Provides utilities for reading fields out of parsed YAML values.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        Self::get_optional_string(obj, field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })
    }

    /// Get an optional string field from YAML object
    ///
    /// Numbers and booleans are accepted and rendered as text, since
    /// component authors frequently leave values like `1.0` unquoted.
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field).and_then(Self::scalar_to_string)
    }

    /// Render a scalar YAML value as a string
    pub fn scalar_to_string(value: &YamlValue) -> Option<String> {
        match value {
            YamlValue::String(s) => Some(s.clone()),
            YamlValue::Number(n) => Some(n.to_string()),
            YamlValue::Bool(b) => Some(b.to_string()),
            YamlValue::Tagged(t) => Self::scalar_to_string(&t.value),
            _ => None,
        }
    }

    /// Get a required array field from YAML object
    pub fn get_array<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a Vec<YamlValue>> {
        obj.get(field)
            .and_then(|v| v.as_sequence())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get an optional array field from YAML object
    pub fn get_optional_array<'a>(obj: &'a YamlValue, field: &str) -> Option<&'a Vec<YamlValue>> {
        obj.get(field).and_then(|v| v.as_sequence())
    }

    /// Convert a sequence of scalars into strings
    pub fn string_list(values: &[YamlValue], field: &str) -> Result<Vec<String>> {
        values
            .iter()
            .map(|v| {
                Self::scalar_to_string(v).ok_or_else(|| ParseError::InvalidValue {
                    field: field.to_string(),
                    message: format!("expected a string, got {}", Self::kind(v)),
                })
            })
            .collect()
    }

    /// Short name of a YAML value's kind, for error messages
    pub fn kind(value: &YamlValue) -> &'static str {
        match value {
            YamlValue::Null => "null",
            YamlValue::Bool(_) => "boolean",
            YamlValue::Number(_) => "number",
            YamlValue::String(_) => "string",
            YamlValue::Sequence(_) => "sequence",
            YamlValue::Mapping(_) => "mapping",
            YamlValue::Tagged(_) => "tagged value",
        }
    }

    /// Validate fields in a YAML object against a list of known fields
    /// Returns warnings for unknown fields with suggestions
    pub fn validate_fields(obj: &YamlValue, known_fields: &[&str], context: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(mapping) = obj.as_mapping() {
            for (key, _) in mapping {
                if let Some(field_name) = key.as_str() {
                    if !known_fields.contains(&field_name) {
                        let typo_correction = FIELD_CORRECTIONS
                            .iter()
                            .find(|(typo, _)| *typo == field_name)
                            .map(|(_, correct)| *correct);

                        let suggestion = if let Some(correct) = typo_correction {
                            format!(" Did you mean '{}'?", correct)
                        } else if let Some(similar) =
                            Self::find_similar_field(field_name, known_fields)
                        {
                            format!(" Did you mean '{}'?", similar)
                        } else {
                            String::new()
                        };

                        warnings.push(format!(
                            "Unknown field '{}' in {}.{}",
                            field_name, context, suggestion
                        ));
                    }
                }
            }
        }

        warnings
    }

    /// Validate fields leniently - unknown fields are logged, never rejected
    pub fn warn_unknown_fields(obj: &YamlValue, known_fields: &[&str], context: &str) {
        for warning in Self::validate_fields(obj, known_fields, context) {
            log::warn!("{}", warning);
        }
    }

    /// Find similar field names using Levenshtein distance
    fn find_similar_field(field: &str, known_fields: &[&str]) -> Option<String> {
        known_fields
            .iter()
            .filter(|known| levenshtein_distance(field, known) <= 2)
            .min_by_key(|known| levenshtein_distance(field, known))
            .map(|s| s.to_string())
    }
}

/// Common field name typos and their corrections
const FIELD_CORRECTIONS: &[(&str, &str)] = &[
    ("input", "inputs"),
    ("command", "commands"),
    ("for_each", "forEach"),
    ("foreach", "forEach"),
    ("step_name", "name"),
    ("type", "action"),
    ("on_failure", "onFailure"),
    ("max_attempts", "maxAttempts"),
    ("timeout", "timeoutSeconds"),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for (i, &c1) in s1_chars.iter().enumerate() {
        for (j, &c2) in s2_chars.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(
                    matrix[i][j + 1] + 1, // deletion
                    matrix[i + 1][j] + 1, // insertion
                ),
                matrix[i][j] + cost, // substitution
            );
        }
    }

    matrix[len1][len2]
}

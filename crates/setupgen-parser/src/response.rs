//! `aws imagebuilder get-component` response envelope
//!
//! The service returns the component's YAML document as a string inside a
//! JSON object alongside its metadata.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Top-level response of `get-component`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetComponentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    pub component: ComponentRecord,
}

impl GetComponentResponse {
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }
}

/// Component metadata and document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// The component document (YAML)
    pub data: String,
}

impl ComponentRecord {
    /// Human-readable identifier for log messages
    pub fn describe(&self) -> String {
        match (&self.arn, &self.name, &self.version) {
            (Some(arn), _, _) => arn.clone(),
            (None, Some(name), Some(version)) => format!("{} {}", name, version),
            (None, Some(name), None) => name.clone(),
            _ => "<unnamed component>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn test_from_json() {
        let response = GetComponentResponse::from_json(
            r#"{"requestId": "r-1", "component": {"name": "eks", "version": "1.24.0", "platform": "Windows", "data": "phases: []"}}"#,
        )
        .unwrap();

        assert_eq!(response.request_id.as_deref(), Some("r-1"));
        assert_eq!(response.component.data, "phases: []");
        assert_eq!(response.component.describe(), "eks 1.24.0");
    }

    #[test]
    fn test_from_json_missing_data() {
        let err = GetComponentResponse::from_json(r#"{"component": {"name": "eks"}}"#).unwrap_err();
        assert!(matches!(err, ParseError::JsonError(_)));
    }

    #[test]
    fn test_describe_prefers_arn() {
        let record = ComponentRecord {
            arn: Some("arn:aws:imagebuilder:us-east-1:aws:component/x/1.0.0".to_string()),
            name: Some("x".to_string()),
            version: None,
            platform: None,
            data: String::new(),
        };
        assert!(record.describe().starts_with("arn:aws"));
    }
}

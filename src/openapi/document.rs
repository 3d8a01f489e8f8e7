//! Minimal OpenAPI object model
//!
//! Only what tool synthesis reads is modelled. Operations and parameters are
//! kept as raw JSON at the path-item level and decoded leniently, so one
//! malformed entry is skipped instead of rejecting the whole document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed OpenAPI document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenApiDocument {
    #[serde(default)]
    pub openapi: Option<String>,

    #[serde(default)]
    pub info: Option<Info>,

    #[serde(default)]
    pub servers: Vec<Server>,

    /// Path template -> path item (HTTP method or `parameters` -> raw object)
    #[serde(default)]
    pub paths: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Document `info` block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Entry of the `servers` array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default)]
    pub variables: BTreeMap<String, ServerVariable>,
}

/// Server URL template variable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerVariable {
    #[serde(default)]
    pub default: Option<String>,
}

impl Server {
    /// URL with `{variable}` placeholders replaced by their defaults
    pub fn resolved_url(&self) -> String {
        let mut url = self.url.clone();
        for (name, variable) in &self.variables {
            if let Some(default) = &variable.default {
                url = url.replace(&format!("{{{}}}", name), default);
            }
        }
        url
    }
}

/// An operation under a path item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw parameter entries; decoded one by one with `Parameter::from_value`
    #[serde(default)]
    pub parameters: Vec<Value>,
}

/// A parameter entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "in")]
    pub location: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<ParameterSchema>,
}

/// The subset of a parameter schema carried into tool input schemas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(default, rename = "type")]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub items: Option<Value>,
}

impl Parameter {
    /// Decode a raw entry, `None` if it is not an object of the expected shape
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// `(name, in)` when both are present
    pub fn key(&self) -> Option<(&str, &str)> {
        match (&self.name, &self.location) {
            (Some(name), Some(location)) => Some((name.as_str(), location.as_str())),
            _ => None,
        }
    }
}

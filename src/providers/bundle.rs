//! Provider bundle
//!
//! One REST API as handed to synthesis: its parsed document plus the static
//! headers and base URL configured for it. Built once at startup, read-only after.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::openapi::OpenApiDocument;

/// Per-provider settings read from `config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Headers sent with every call to this provider
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Overrides the document's `servers` entry
    #[serde(default)]
    pub base_url: Option<String>,
}

/// A parsed document together with its provider settings
#[derive(Debug, Clone, Default)]
pub struct ProviderBundle {
    pub document: OpenApiDocument,
    pub headers: BTreeMap<String, String>,
    pub base_url: Option<String>,
}

impl ProviderBundle {
    /// Create a bundle with no headers and no configured base URL
    pub fn new(document: OpenApiDocument) -> Self {
        Self {
            document,
            headers: BTreeMap::new(),
            base_url: None,
        }
    }

    /// Create a bundle from a document and its `config.json` settings
    pub fn with_config(document: OpenApiDocument, config: ProviderConfig) -> Self {
        Self {
            document,
            headers: config.headers,
            base_url: config.base_url,
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a static header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

//! Tool registry
//!
//! Holds every synthesized tool across providers, keyed by tool id and kept in
//! insertion order. Populated once at startup, then shared read-only (behind an
//! `Arc`) by concurrent dispatchers.

use std::collections::{BTreeMap, HashMap};

use crate::openapi::ToolSynthesizer;
use crate::providers::ProviderBundle;

use super::descriptor::{HttpMethod, ToolDescriptor};

/// Registry of synthesized tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    /// `(tool id, tool)` in insertion order
    entries: Vec<(String, ToolDescriptor)>,

    /// Tool id -> position in `entries`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize and register the tools of every provider
    ///
    /// A provider that fails synthesis is logged and skipped; the others still load.
    pub fn from_providers(
        providers: &BTreeMap<String, ProviderBundle>,
        synthesizer: &ToolSynthesizer,
    ) -> Self {
        let mut registry = Self::new();

        for (name, bundle) in providers {
            match synthesizer.synthesize(name, bundle) {
                Ok(tools) => {
                    for (tool_id, tool) in tools {
                        registry.add(tool_id, tool);
                    }
                }
                Err(e) => {
                    tracing::warn!("[ToolRegistry] Skipping provider '{}': {}", name, e);
                }
            }
        }

        tracing::info!(
            "[ToolRegistry] Registered {} tools from {} providers",
            registry.len(),
            providers.len()
        );

        registry
    }

    /// Insert or replace the tool stored under `tool_id`
    ///
    /// A replaced tool keeps its original position.
    pub fn add(&mut self, tool_id: impl Into<String>, tool: ToolDescriptor) {
        let tool_id = tool_id.into();

        match self.index.get(&tool_id) {
            Some(&position) => {
                let previous = &self.entries[position].1;
                if previous.provider != tool.provider {
                    tracing::warn!(
                        "[ToolRegistry] Tool id '{}' from provider '{}' replaces the one from '{}'",
                        tool_id,
                        tool.provider,
                        previous.provider
                    );
                }
                self.entries[position].1 = tool;
            }
            None => {
                tracing::debug!("[ToolRegistry] Registering tool '{}'", tool_id);
                self.index.insert(tool_id.clone(), self.entries.len());
                self.entries.push((tool_id, tool));
            }
        }
    }

    /// All tools in insertion order
    pub fn all(&self) -> Vec<&ToolDescriptor> {
        self.entries.iter().map(|(_, tool)| tool).collect()
    }

    /// Get a tool by id
    pub fn get(&self, tool_id: &str) -> Option<&ToolDescriptor> {
        self.index
            .get(tool_id)
            .map(|&position| &self.entries[position].1)
    }

    /// Find a tool by id, falling back to a linear scan by name
    pub fn find(&self, id_or_name: &str) -> Option<(&str, &ToolDescriptor)> {
        if let Some(&position) = self.index.get(id_or_name) {
            let (tool_id, tool) = &self.entries[position];
            return Some((tool_id.as_str(), tool));
        }

        self.entries
            .iter()
            .find(|(_, tool)| tool.name == id_or_name)
            .map(|(tool_id, tool)| (tool_id.as_str(), tool))
    }

    /// Get the list of tool ids in insertion order
    pub fn tool_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Get the list of tool names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, t)| t.name.as_str()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a tool id back into `(method, path)`
///
/// Heuristic inverse of `openapi::tool_id` and only meaningful for ids built
/// by it: the first hyphen separates the method, every other hyphen becomes a
/// slash. Hyphens that were part of the original path (and stripped braces)
/// cannot be recovered, so `GET-users-id` yields `/users/id`, never
/// `/users/{id}`.
pub fn decompose(tool_id: &str) -> Option<(HttpMethod, String)> {
    let (method, rest) = tool_id.split_once('-')?;
    let method = method.parse::<HttpMethod>().ok()?;
    Some((method, format!("/{}", rest.replace('-', "/"))))
}

//! Tool synthesis
//!
//! Converts every `(path, method)` operation of a provider's document into a
//! `ToolDescriptor`. Unknown method keys and malformed parameter entries are
//! logged and skipped; only a missing base URL fails the provider.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::core::{BridgeError, BridgeResult};
use crate::naming::{Compressor, DEFAULT_MAX_LENGTH};
use crate::providers::ProviderBundle;
use crate::tools::{
    HttpMethod, InputSchema, ParamLocation, ParamSpec, PropertySchema, ToolDescriptor,
};

use super::document::{Operation, Parameter};

/// Path-item key holding parameters shared by all operations of the path
const PATH_PARAMETERS_KEY: &str = "parameters";

/// Build a tool id from method and path
///
/// `GET /users/{id}/posts` becomes `GET-users-id-posts`: the method is
/// upper-cased, the leading slash and placeholder braces are dropped and any
/// character other than ASCII alphanumerics and `-` becomes `-`.
pub fn tool_id(method: HttpMethod, path: &str) -> String {
    let segments: String = path
        .strip_prefix('/')
        .unwrap_or(path)
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();

    format!("{}-{}", method.as_upper(), segments)
}

/// Base URL for a provider: the configured one, else the document's first server
pub fn resolve_base_url(provider_name: &str, bundle: &ProviderBundle) -> BridgeResult<String> {
    let configured = bundle
        .base_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    let base_url = configured.or_else(|| {
        bundle
            .document
            .servers
            .first()
            .map(|server| server.resolved_url().trim().to_string())
            .filter(|url| !url.is_empty())
    });

    base_url
        .map(|url| url.trim_end_matches('/').to_string())
        .ok_or_else(|| BridgeError::MissingBaseUrl(provider_name.to_string()))
}

/// Builds tool descriptors from provider bundles
#[derive(Debug, Clone)]
pub struct ToolSynthesizer {
    compressor: Compressor,
    max_name_length: usize,
}

impl ToolSynthesizer {
    /// Create a synthesizer with the standard compressor and 64-character names
    pub fn new() -> Self {
        Self {
            compressor: Compressor::standard(),
            max_name_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Use a custom compressor (e.g. with a fixture lexicon)
    pub fn with_compressor(mut self, compressor: Compressor) -> Self {
        self.compressor = compressor;
        self
    }

    /// Set the bound on the compressed part of tool names
    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    /// Synthesize all tools of one provider, keyed by tool id
    pub fn synthesize(
        &self,
        provider_name: &str,
        bundle: &ProviderBundle,
    ) -> BridgeResult<BTreeMap<String, ToolDescriptor>> {
        let base_url = resolve_base_url(provider_name, bundle)?;
        let mut tools = BTreeMap::new();

        for (path, item) in &bundle.document.paths {
            let shared_params = item
                .get(PATH_PARAMETERS_KEY)
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            for (key, raw_operation) in item {
                if key == PATH_PARAMETERS_KEY {
                    continue;
                }

                let method = match key.parse::<HttpMethod>() {
                    Ok(method) => method,
                    Err(_) => {
                        tracing::warn!(
                            "[ToolSynthesis] Skipping unsupported method '{}' on '{}' (provider '{}')",
                            key,
                            path,
                            provider_name
                        );
                        continue;
                    }
                };

                let operation: Operation = match serde_json::from_value(raw_operation.clone()) {
                    Ok(operation) => operation,
                    Err(e) => {
                        tracing::warn!(
                            "[ToolSynthesis] Skipping malformed operation {} {} (provider '{}'): {}",
                            method.as_upper(),
                            path,
                            provider_name,
                            e
                        );
                        continue;
                    }
                };

                let tool = self.build_tool(
                    provider_name,
                    bundle,
                    &base_url,
                    method,
                    path,
                    &operation,
                    shared_params,
                );

                tracing::debug!(
                    "[ToolSynthesis] {} -> '{}' ({} params)",
                    tool.tool_id,
                    tool.name,
                    tool.params.len()
                );
                if let Some(previous) = tools.insert(tool.tool_id.clone(), tool) {
                    tracing::warn!(
                        "[ToolSynthesis] Tool id '{}' from {} {} replaces the one from {} {} (provider '{}')",
                        previous.tool_id,
                        method.as_upper(),
                        path,
                        method.as_upper(),
                        previous.path,
                        provider_name
                    );
                }
            }
        }

        tracing::info!(
            "[ToolSynthesis] Synthesized {} tools for provider '{}'",
            tools.len(),
            provider_name
        );

        Ok(tools)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_tool(
        &self,
        provider_name: &str,
        bundle: &ProviderBundle,
        base_url: &str,
        method: HttpMethod,
        path: &str,
        operation: &Operation,
        shared_params: &[Value],
    ) -> ToolDescriptor {
        let id = tool_id(method, path);
        let compressed = self
            .compressor
            .compress(&name_source(operation, method, path), self.max_name_length);

        let description = operation
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Make a {} request to {}", method.as_upper(), path));

        let parameters = merge_parameters(&id, shared_params, &operation.parameters);
        let (input_schema, params) = classify_parameters(&id, &parameters);

        ToolDescriptor {
            tool_id: id,
            name: format!("{}-{}", provider_name, compressed),
            description,
            provider: provider_name.to_string(),
            method,
            path: path.to_string(),
            base_url: base_url.to_string(),
            headers: bundle.headers.clone(),
            input_schema,
            params,
        }
    }
}

impl Default for ToolSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// operationId, else summary, else `METHOD /path`
fn name_source(operation: &Operation, method: HttpMethod, path: &str) -> String {
    [&operation.operation_id, &operation.summary]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| format!("{} {}", method.as_upper(), path))
}

/// Decode parameter entries, letting operation-level ones override path-level ones
///
/// Entries without both `name` and `in` are dropped.
fn merge_parameters(tool_id: &str, shared: &[Value], own: &[Value]) -> Vec<Parameter> {
    let decode = |raw: &Value| -> Option<Parameter> {
        match Parameter::from_value(raw) {
            Some(param) if param.key().is_some() => Some(param),
            _ => {
                tracing::warn!(
                    "[ToolSynthesis] Skipping parameter without name/in on '{}': {}",
                    tool_id,
                    raw
                );
                None
            }
        }
    };

    let own: Vec<Parameter> = own.iter().filter_map(&decode).collect();
    let overridden: HashSet<(String, String)> = own
        .iter()
        .filter_map(Parameter::key)
        .map(|(name, location)| (name.to_string(), location.to_string()))
        .collect();

    let mut merged: Vec<Parameter> = shared
        .iter()
        .filter_map(&decode)
        .filter(|param| {
            param.key().is_some_and(|(name, location)| {
                !overridden.contains(&(name.to_string(), location.to_string()))
            })
        })
        .collect();
    merged.extend(own);
    merged
}

/// Build the advertised schema and the dispatch classification together
fn classify_parameters(
    tool_id: &str,
    parameters: &[Parameter],
) -> (InputSchema, BTreeMap<String, ParamSpec>) {
    let mut schema = InputSchema::default();
    let mut params = BTreeMap::new();

    for param in parameters {
        let Some((name, location)) = param.key() else {
            continue;
        };

        let Some(location) = ParamLocation::from_openapi(location) else {
            tracing::warn!(
                "[ToolSynthesis] Skipping parameter '{}' on '{}': unsupported location '{}'",
                name,
                tool_id,
                location
            );
            continue;
        };

        let param_type = param
            .schema
            .as_ref()
            .and_then(|s| s.schema_type.clone())
            .unwrap_or_else(|| "string".to_string());
        let description = param
            .description
            .clone()
            .unwrap_or_else(|| format!("{} parameter", name));
        let items = match param_type.as_str() {
            "array" => param.schema.as_ref().and_then(|s| s.items.clone()),
            _ => None,
        };
        let required = param.required.unwrap_or(false);

        schema.properties.insert(
            name.to_string(),
            PropertySchema {
                property_type: param_type.clone(),
                description: description.clone(),
                items,
            },
        );
        params.insert(
            name.to_string(),
            ParamSpec {
                location,
                required,
                param_type,
                description,
            },
        );

        let listed = schema.required.iter().any(|r| r == name);
        if required && !listed {
            schema.required.push(name.to_string());
        } else if !required && listed {
            schema.required.retain(|r| r != name);
        }
    }

    (schema, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::OpenApiDocument;
    use serde_json::json;

    fn bundle(document: Value) -> ProviderBundle {
        ProviderBundle::new(serde_json::from_value::<OpenApiDocument>(document).unwrap())
    }

    fn petstore() -> ProviderBundle {
        bundle(json!({
            "openapi": "3.0.0",
            "servers": [{ "url": "https://petstore.example.com/v1/" }],
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "description": "List all pets",
                        "parameters": [
                            { "name": "limit", "in": "query",
                              "schema": { "type": "integer" }, "description": "Page size" },
                            { "name": "tags", "in": "query",
                              "schema": { "type": "array", "items": { "type": "string" } } },
                            { "name": "session", "in": "cookie" },
                            { "in": "query" },
                            "garbage"
                        ]
                    },
                    "post": { "summary": "Create a pet" },
                    "trace": { "operationId": "tracePets" },
                    "x-internal": true
                },
                "/pets/{petId}": {
                    "parameters": [
                        { "name": "petId", "in": "path", "required": true,
                          "description": "Shared description" },
                        { "name": "X-Request-Id", "in": "header" }
                    ],
                    "get": {
                        "parameters": [
                            { "name": "petId", "in": "path", "required": true,
                              "description": "The pet to fetch" }
                        ]
                    },
                    "delete": {}
                }
            }
        }))
    }

    #[test]
    fn test_tool_id() {
        assert_eq!(tool_id(HttpMethod::Get, "/users/{id}/posts"), "GET-users-id-posts");
        assert_eq!(tool_id(HttpMethod::Patch, "/v1/a.b/{x_y}"), "PATCH-v1-a-b-x-y");
        assert_eq!(tool_id(HttpMethod::Delete, "/"), "DELETE-");
    }

    #[test]
    fn test_synthesize_petstore() {
        let tools = ToolSynthesizer::new().synthesize("petstore", &petstore()).unwrap();

        let ids: Vec<&str> = tools.keys().map(String::as_str).collect();
        assert_eq!(
            ids,
            vec!["DELETE-pets-petId", "GET-pets", "GET-pets-petId", "POST-pets"]
        );

        let list = &tools["GET-pets"];
        assert_eq!(list.name, "petstore-list-pets");
        assert_eq!(list.description, "List all pets");
        assert_eq!(list.base_url, "https://petstore.example.com/v1");
        assert_eq!(list.method, HttpMethod::Get);
        assert_eq!(list.path, "/pets");

        // cookie, nameless and non-object entries are dropped from both maps
        let names: Vec<&str> = list.params.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["limit", "tags"]);
        assert_eq!(
            list.params.keys().collect::<Vec<_>>(),
            list.input_schema.properties.keys().collect::<Vec<_>>()
        );

        let limit = &list.params["limit"];
        assert_eq!(limit.location, ParamLocation::Query);
        assert!(!limit.required);
        assert_eq!(limit.param_type, "integer");
        assert_eq!(list.input_schema.properties["limit"].description, "Page size");
        assert_eq!(
            list.input_schema.properties["tags"].items,
            Some(json!({ "type": "string" }))
        );
        assert_eq!(list.input_schema.properties["tags"].description, "tags parameter");
        assert!(list.input_schema.required.is_empty());
    }

    #[test]
    fn test_name_and_description_fallbacks() {
        let tools = ToolSynthesizer::new().synthesize("petstore", &petstore()).unwrap();

        let create = &tools["POST-pets"];
        assert_eq!(create.name, "petstore-create-pet");
        assert_eq!(create.description, "Make a POST request to /pets");

        let delete = &tools["DELETE-pets-petId"];
        assert_eq!(delete.name, "petstore-delete-pets-pet-id");
    }

    #[test]
    fn test_path_level_parameters_are_merged() {
        let tools = ToolSynthesizer::new().synthesize("petstore", &petstore()).unwrap();

        let show = &tools["GET-pets-petId"];
        assert_eq!(show.params["petId"].location, ParamLocation::Path);
        assert!(show.params["petId"].required);
        assert_eq!(show.params["petId"].description, "The pet to fetch");
        assert_eq!(show.params["X-Request-Id"].location, ParamLocation::Header);
        assert_eq!(show.input_schema.required, vec!["petId".to_string()]);

        let delete = &tools["DELETE-pets-petId"];
        assert_eq!(delete.params["petId"].description, "Shared description");
    }

    #[test]
    fn test_unknown_methods_are_skipped() {
        let tools = ToolSynthesizer::new().synthesize("petstore", &petstore()).unwrap();
        assert!(!tools.keys().any(|id| id.starts_with("TRACE")));
        assert!(tools.values().all(|t| !t.name.contains("trace")));
    }

    #[test]
    fn test_colliding_tool_ids_keep_the_later_path() {
        let provider = bundle(json!({
            "servers": [{ "url": "https://p.example.com" }],
            "paths": {
                "/a-b": { "get": { "operationId": "dash" } },
                "/a/b": { "get": { "operationId": "slash" } }
            }
        }));
        let tools = ToolSynthesizer::new().synthesize("p", &provider).unwrap();

        assert_eq!(tools.len(), 1);
        let tool = &tools["GET-a-b"];
        assert_eq!(tool.name, "p-slash");
        assert_eq!(tool.path, "/a/b");
    }

    #[test]
    fn test_missing_base_url_is_fatal() {
        let no_servers = bundle(json!({ "paths": { "/ping": { "get": {} } } }));
        let err = ToolSynthesizer::new()
            .synthesize("orphan", &no_servers)
            .unwrap_err();
        assert!(matches!(err, BridgeError::MissingBaseUrl(ref p) if p == "orphan"));

        let configured = no_servers.with_base_url("http://localhost:8080/");
        let tools = ToolSynthesizer::new().synthesize("orphan", &configured).unwrap();
        assert_eq!(tools["GET-ping"].base_url, "http://localhost:8080");
    }

    #[test]
    fn test_configured_base_url_and_headers() {
        let provider = petstore()
            .with_base_url("https://staging.example.com")
            .with_header("Authorization", "Bearer token");
        let tools = ToolSynthesizer::new().synthesize("petstore", &provider).unwrap();

        for tool in tools.values() {
            assert_eq!(tool.base_url, "https://staging.example.com");
            assert_eq!(tool.headers["Authorization"], "Bearer token");
        }
    }

    #[test]
    fn test_synthesis_is_stable() {
        let synthesizer = ToolSynthesizer::new().with_max_name_length(16);
        let first = synthesizer.synthesize("petstore", &petstore()).unwrap();
        let second = synthesizer.synthesize("petstore", &petstore()).unwrap();
        assert_eq!(first, second);

        for tool in first.values() {
            let compressed = tool.name.strip_prefix("petstore-").unwrap();
            assert!(compressed.len() <= 16);
        }
    }
}

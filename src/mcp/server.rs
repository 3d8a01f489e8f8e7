//! MCP server
//!
//! Serves the registry over MCP: `tools/list` advertises every tool,
//! `tools/call` resolves the tool by id or name and dispatches it.

use std::future::Future;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::{Map, Value};

use crate::core::BridgeError;
use crate::dispatch::Dispatcher;
use crate::tools::ToolRegistry;

use super::tool_adapter::{to_call_result, to_rmcp_tool};

/// MCP server exposing synthesized tools
#[derive(Debug, Clone)]
pub struct BridgeServer {
    /// Read-only after startup
    registry: Arc<ToolRegistry>,

    dispatcher: Dispatcher,
}

impl BridgeServer {
    /// Create a server over a populated registry
    pub fn new(registry: Arc<ToolRegistry>, dispatcher: Dispatcher) -> Self {
        tracing::info!("[BridgeServer] Serving {} tools", registry.len());
        Self {
            registry,
            dispatcher,
        }
    }

    /// Get the registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Every tool as advertised over MCP, in registry order
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.all().into_iter().map(to_rmcp_tool).collect()
    }

    /// Call a tool by id or name
    ///
    /// An unknown tool is a protocol error; dispatch failures are reported as
    /// `is_error` results.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, ErrorData> {
        let Some((tool_id, tool)) = self.registry.find(name) else {
            tracing::warn!("[BridgeServer] Unknown tool '{}'", name);
            return Err(ErrorData::invalid_params(
                BridgeError::ToolNotFound(name.to_string()).to_string(),
                None,
            ));
        };

        tracing::info!("[BridgeServer] Calling '{}' ({})", tool.name, tool_id);

        let arguments = arguments.unwrap_or_default();
        let result = self.dispatcher.execute(tool, &arguments).await;

        if let Err(e) = &result {
            tracing::warn!("[BridgeServer] '{}' failed: {}", tool.name, e);
        }

        Ok(to_call_result(result))
    }
}

impl ServerHandler for BridgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("OpenAPI MCP Bridge".to_string()),
                ..Default::default()
            },
            instructions: Some(
                "Each tool calls one REST endpoint. Tool names are `provider-operation`; \
                 arguments map to path, query and header parameters."
                    .to_string(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move { self.call(&request.name, request.arguments).await }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BridgeResult;
    use crate::dispatch::{BoundRequest, HttpResponse, HttpTransport};
    use crate::openapi::{OpenApiDocument, ToolSynthesizer};
    use crate::providers::ProviderBundle;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    struct EchoTransport {
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpTransport for EchoTransport {
        async fn send(&self, request: &BoundRequest) -> BridgeResult<HttpResponse> {
            self.urls.lock().await.push(request.url.clone());
            if request.url.ends_with("/missing") {
                return Ok(HttpResponse::new(404, "gone"));
            }
            Ok(HttpResponse::new(200, r#"{"ok":true}"#))
        }
    }

    fn server() -> (BridgeServer, Arc<EchoTransport>) {
        let document: OpenApiDocument = serde_json::from_value(json!({
            "servers": [{ "url": "https://notes.example.com" }],
            "paths": {
                "/notes/{noteId}": {
                    "get": {
                        "operationId": "getNoteById",
                        "parameters": [{ "name": "noteId", "in": "path", "required": true }]
                    }
                },
                "/missing": { "get": { "operationId": "missing" } }
            }
        }))
        .unwrap();

        let mut providers = BTreeMap::new();
        providers.insert("notes".to_string(), ProviderBundle::new(document));
        let registry = ToolRegistry::from_providers(&providers, &ToolSynthesizer::new());

        let transport = Arc::new(EchoTransport {
            urls: Mutex::new(Vec::new()),
        });
        let server = BridgeServer::new(Arc::new(registry), Dispatcher::new(transport.clone()));
        (server, transport)
    }

    #[test]
    fn test_get_info_enables_tools() {
        let (server, _) = server();
        assert!(server.get_info().capabilities.tools.is_some());
    }

    #[test]
    fn test_tools_are_advertised() {
        let (server, _) = server();
        let names: Vec<String> = server.tools().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, vec!["notes-missing", "notes-note-by-id"]);
    }

    #[tokio::test]
    async fn test_call_by_name_and_id() {
        let (server, transport) = server();

        let args = json!({ "noteId": "n1" }).as_object().cloned();
        let result = server.call("notes-note-by-id", args.clone()).await.unwrap();
        assert_eq!(result.is_error, Some(false));

        let result = server.call("GET-notes-noteId", args).await.unwrap();
        assert_eq!(result.is_error, Some(false));

        let urls = transport.urls.lock().await;
        assert_eq!(
            *urls,
            vec![
                "https://notes.example.com/notes/n1".to_string(),
                "https://notes.example.com/notes/n1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatch_failures_are_tool_errors() {
        let (server, transport) = server();

        let result = server.call("notes-note-by-id", None).await.unwrap();
        assert_eq!(result.is_error, Some(true));

        let result = server.call("notes-missing", None).await.unwrap();
        assert_eq!(result.is_error, Some(true));

        assert_eq!(transport.urls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let (server, _) = server();
        let err = server.call("notes-nope", None).await.unwrap_err();
        assert_eq!(err.message, "Tool not found: notes-nope");
    }
}

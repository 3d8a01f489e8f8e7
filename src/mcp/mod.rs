//! MCP (Model Context Protocol) surface
//!
//! Exposes the tool registry to agents through rmcp.
//!
//! # Architecture
//!
//! - `BridgeConfig`: Settings for the bridge binary (providers dir, timeout, name bound)
//! - `BridgeServer`: rmcp `ServerHandler` listing registry tools and dispatching calls
//! - `to_rmcp_tool` / `to_call_result`: Conversions between bridge and rmcp types
//!
//! # Usage
//!
//! ```ignore
//! use rmcp::ServiceExt;
//!
//! let server = BridgeServer::new(Arc::new(registry), Dispatcher::default());
//! let service = server.serve(rmcp::transport::stdio()).await?;
//! service.waiting().await?;
//! ```
//!
//! # Tool Naming
//!
//! Tools are advertised under their compressed name, prefixed with the provider:
//! - Provider: `github`
//! - Operation id: `listRepositoryCollaborators`
//! - Exposed name: `github-list-repo-collaborators`
//!
//! Calls may use either that name or the tool id (`GET-repos-owner-repo-collaborators`).

mod config;
mod server;
mod tool_adapter;

pub use config::{BridgeConfig, ENV_MAX_NAME_LENGTH, ENV_PROVIDERS_DIR, ENV_TIMEOUT_MS};
pub use server::BridgeServer;
pub use tool_adapter::{to_call_result, to_rmcp_tool};

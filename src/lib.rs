//! Expose OpenAPI-described REST APIs as MCP tools
//!
//! Each provider is an OpenAPI document (plus optional headers and base URL).
//! Every operation becomes a `ToolDescriptor` with a short, deterministic name;
//! the `ToolRegistry` holds them all and the `Dispatcher` turns a tool call
//! into an HTTP request.

pub mod core;
pub mod naming;
pub mod openapi;
pub mod tools;

// Request execution
pub mod dispatch;

// Loading providers from disk
pub mod providers;

// MCP (Model Context Protocol) server
pub mod mcp;

pub mod logging;

pub use crate::core::{BridgeError, BridgeResult};
pub use dispatch::Dispatcher;
pub use mcp::{BridgeConfig, BridgeServer};
pub use naming::compress;
pub use openapi::ToolSynthesizer;
pub use providers::{load_providers, ProviderBundle};
pub use tools::{ToolDescriptor, ToolRegistry};

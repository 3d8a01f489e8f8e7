//! Tool model and registry
//!
//! This module provides:
//! - `ToolDescriptor` - A callable tool synthesized from one OpenAPI operation
//! - `ToolRegistry` - Lookup by id or name across all providers
//! - `decompose` - Heuristic split of a tool id into method and path

mod descriptor;
mod registry;

pub use descriptor::{
    HttpMethod, InputSchema, ParamLocation, ParamSpec, PropertySchema, ToolDescriptor,
};
pub use registry::{decompose, ToolRegistry};

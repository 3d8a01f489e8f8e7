//! OpenAPI documents and tool synthesis
//!
//! - `OpenApiDocument` - the parsed document model consumed by synthesis
//! - `ToolSynthesizer` - turns each `(path, method)` operation into a `ToolDescriptor`

mod document;
mod synthesis;

pub use document::{Info, OpenApiDocument, Operation, Parameter, ParameterSchema, Server, ServerVariable};
pub use synthesis::{resolve_base_url, tool_id, ToolSynthesizer};

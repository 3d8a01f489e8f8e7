//! Parameter binding
//!
//! Maps a caller's argument object onto a tool descriptor, producing the
//! concrete request to send. Pure: no I/O, no shared state.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::core::{BridgeError, BridgeResult};
use crate::tools::{HttpMethod, ParamLocation, ToolDescriptor};

/// A fully resolved HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRequest {
    pub method: HttpMethod,
    /// Base URL plus the path with placeholders substituted
    pub url: String,
    /// Query pairs in argument order
    pub query: Vec<(String, String)>,
    /// Static provider headers plus header-bound arguments
    pub headers: BTreeMap<String, String>,
}

/// Render an argument as a string
///
/// Arrays become comma-joined lists, strings are used as-is, `null` is empty.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Percent-encode everything except RFC 3986 unreserved characters
pub fn percent_encode_path_param(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => encoded.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    encoded.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    encoded
}

fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Bind `args` onto `tool`
///
/// Fails if a required parameter is absent or `null`. Arguments the tool does
/// not advertise are ignored.
pub fn bind(tool: &ToolDescriptor, args: &Map<String, Value>) -> BridgeResult<BoundRequest> {
    if let Some((name, _)) = tool
        .params
        .iter()
        .find(|(name, spec)| spec.required && is_missing(args.get(name.as_str())))
    {
        return Err(BridgeError::missing_parameter(&tool.name, name));
    }

    let mut path = tool.path.clone();
    let mut query = Vec::new();
    let mut headers = tool.headers.clone();

    for (name, value) in args {
        if !tool.input_schema.has_property(name) {
            tracing::debug!("[Binding] Ignoring unknown argument '{}' for '{}'", name, tool.name);
            continue;
        }
        let Some(spec) = tool.params.get(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        match spec.location {
            ParamLocation::Path => {
                let placeholder = format!("{{{}}}", name);
                path = path.replace(&placeholder, &percent_encode_path_param(&render_value(value)));
            }
            ParamLocation::Query => query.push((name.clone(), render_value(value))),
            ParamLocation::Header => {
                headers.insert(name.clone(), render_value(value));
            }
        }
    }

    let separator = if path.starts_with('/') || path.is_empty() { "" } else { "/" };
    let url = format!("{}{}{}", tool.base_url, separator, path);

    Ok(BoundRequest {
        method: tool.method,
        url,
        query,
        headers,
    })
}

//! MCP tool adapter
//!
//! Converts tool descriptors and dispatch results to their rmcp counterparts.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, Tool};
use serde_json::Value;

use crate::core::BridgeResult;
use crate::tools::ToolDescriptor;

/// Advertise a descriptor as an MCP tool (named by its compressed name)
pub fn to_rmcp_tool(tool: &ToolDescriptor) -> Tool {
    Tool::new(
        tool.name.clone(),
        tool.description.clone(),
        Arc::new(tool.input_schema.to_json_object()),
    )
}

/// Convert a dispatch result to an MCP call result
///
/// Dispatch failures become `is_error` results carrying the error message, so
/// the calling agent sees why the call failed.
pub fn to_call_result(result: BridgeResult<Value>) -> CallToolResult {
    match result {
        Ok(Value::String(text)) => CallToolResult::success(vec![Content::text(text)]),
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            CallToolResult::success(vec![Content::text(text)])
        }
        Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BridgeError;
    use crate::tools::{HttpMethod, InputSchema, PropertySchema};
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                RawContent::Text(text) => Some(text.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_tool_conversion() {
        let mut input_schema = InputSchema::default();
        input_schema.properties.insert(
            "id".to_string(),
            PropertySchema {
                property_type: "string".to_string(),
                description: "id parameter".to_string(),
                items: None,
            },
        );
        input_schema.required.push("id".to_string());

        let descriptor = ToolDescriptor {
            tool_id: "GET-users-id".to_string(),
            name: "crm-user".to_string(),
            description: "Fetch a user".to_string(),
            provider: "crm".to_string(),
            method: HttpMethod::Get,
            path: "/users/{id}".to_string(),
            base_url: "https://crm.example.com".to_string(),
            headers: Default::default(),
            input_schema,
            params: Default::default(),
        };

        let tool = to_rmcp_tool(&descriptor);
        assert_eq!(tool.name, "crm-user");
        assert_eq!(tool.description.as_deref(), Some("Fetch a user"));
        assert_eq!(
            Value::Object(tool.input_schema.as_ref().clone()),
            json!({
                "type": "object",
                "properties": { "id": { "type": "string", "description": "id parameter" } },
                "required": ["id"]
            })
        );
    }

    #[test]
    fn test_call_result_conversion() {
        let ok = to_call_result(Ok(json!({ "id": 1 })));
        assert_eq!(ok.is_error, Some(false));
        assert_eq!(text_of(&ok), "{\n  \"id\": 1\n}");

        let text = to_call_result(Ok(Value::String("pong".to_string())));
        assert_eq!(text_of(&text), "pong");

        let err = to_call_result(Err(BridgeError::HttpStatus {
            status: 500,
            body: "boom".to_string(),
        }));
        assert_eq!(err.is_error, Some(true));
        assert_eq!(text_of(&err), "Request failed with status 500: boom");
    }
}

//! Tool definitions
//!
//! A tool is a named, documented operation with a JSON schema describing its
//! parameters. The catalog is fixed in code; nothing is loaded at runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool definition exposed through the host loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (e.g., "get_latest_quotes", "place_limit_order")
    pub name: String,
    /// Human-readable description for the host
    pub description: String,
    /// JSON schema for input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Set input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_new() {
        let tool = ToolDefinition::new("get_clock", "Get the current market clock");
        assert_eq!(tool.name, "get_clock");
        assert_eq!(tool.description, "Get the current market clock");
        assert_eq!(tool.input_schema["type"], "object");
        assert!(tool.input_schema["properties"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_tool_definition_with_schema() {
        let tool = ToolDefinition::new("get_asset", "Get asset details").with_schema(json!({
            "type": "object",
            "properties": {
                "symbol_or_asset_id": { "type": "string" }
            },
            "required": ["symbol_or_asset_id"]
        }));

        assert_eq!(tool.input_schema["required"][0], "symbol_or_asset_id");
        assert!(tool.input_schema["properties"]["symbol_or_asset_id"].is_object());
    }

    #[test]
    fn test_tool_definition_serialization() {
        let tool = ToolDefinition::new("get_account", "Get account details");
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("\"name\":\"get_account\""));
        assert!(json.contains("\"input_schema\""));
    }

    #[test]
    fn test_tool_definition_deserialization() {
        let json = r#"{
            "name": "cancel_orders",
            "description": "Cancel all open orders",
            "input_schema": { "type": "object", "properties": {}, "required": [] }
        }"#;

        let tool: ToolDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(tool.name, "cancel_orders");
        assert_eq!(tool.description, "Cancel all open orders");
    }
}

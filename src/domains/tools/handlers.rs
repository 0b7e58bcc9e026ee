//! Tool handler contract.
//!
//! Every tool implements [`ToolHandler`]. A handler receives only the
//! `arguments` object of the call, validates it against its own parameter
//! type, and either produces a result or returns a [`ToolError`] which the
//! registry converts into an `isError` result.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::de::DeserializeOwned;

use super::error::ToolError;

/// Trait implemented by every registered tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The descriptor advertised in `tools/list`.
    fn tool(&self) -> Tool;

    /// The tool name. Must be unique within a registry.
    fn name(&self) -> String {
        self.tool().name.to_string()
    }

    /// Execute the tool with the given arguments.
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}

/// Deserialize tool arguments into a typed parameter struct.
///
/// Missing required fields and wrongly-typed values become
/// [`ToolError::InvalidArguments`].
pub fn parse_params<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Reject a string argument that is empty or whitespace.
pub fn require_non_blank<'a>(field: &str, value: &'a str) -> Result<&'a str, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "'{field}' must not be empty"
        )));
    }
    Ok(trimmed)
}

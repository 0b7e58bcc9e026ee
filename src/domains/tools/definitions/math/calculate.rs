//! Calculate tool definition.
//!
//! Evaluates an arithmetic expression with the parser in `expr.rs`. Nothing
//! outside that grammar is ever executed.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::expr;
use crate::domains::tools::definitions::common::{describe, success_result};
use crate::domains::tools::{ToolError, ToolHandler, parse_params};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the calculate tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculateParams {
    /// The expression to evaluate.
    #[schemars(description = "Mathematical expression (e.g., \"2 + 2\", \"sqrt(16)\")")]
    pub expression: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculate tool - evaluates arithmetic expressions.
#[derive(Debug, Clone, Default)]
pub struct CalculateTool;

impl CalculateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Perform mathematical calculations safely. Supports numbers, + - * /, parentheses, sqrt, sin, cos, tan and the constants pi and e.";

    pub fn new() -> Self {
        Self
    }

    /// Evaluate the expression and format `"{expression} = {value}"`.
    #[instrument(skip_all, fields(expression = %params.expression))]
    pub fn execute(params: &CalculateParams) -> Result<CallToolResult, ToolError> {
        let value = expr::evaluate(&params.expression).map_err(|e| {
            ToolError::execution_failed(format!(
                "Could not evaluate \"{}\": {}",
                params.expression, e
            ))
        })?;

        info!("Evaluated expression to {}", value);
        Ok(success_result(format!("{} = {}", params.expression, value)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        describe::<CalculateParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for CalculateTool {
    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: CalculateParams = parse_params(arguments)?;
        Self::execute(&params)
    }
}

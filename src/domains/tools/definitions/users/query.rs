//! Query users tool definition.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{describe, success_result};
use crate::domains::tools::{ToolError, ToolHandler, parse_params};
use crate::domains::users::{User, UserStore};

/// Default number of users returned when no limit is given.
pub const DEFAULT_LIMIT: u32 = 10;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the query users tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryUsersParams {
    /// Case-insensitive substring to match against user names.
    #[schemars(description = "Filter users by name (optional, case-insensitive substring)")]
    #[serde(default)]
    pub name_filter: Option<String>,

    /// Maximum number of users to return.
    #[schemars(description = "Maximum results (default: 10)")]
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Format a listing of users with a leading count.
pub fn format_users(users: &[User]) -> String {
    if users.is_empty() {
        return "Found 0 users.".to_string();
    }

    let listing = users
        .iter()
        .map(User::summary)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Found {} users:\n\n{}", users.len(), listing)
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Query users tool - lists users from the store.
pub struct QueryUsersTool {
    store: Arc<dyn UserStore>,
}

impl QueryUsersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "query_users";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Query users from the database";

    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Run the query and format the listing.
    #[instrument(skip_all, fields(name_filter = ?params.name_filter, limit = ?params.limit))]
    pub async fn execute(&self, params: &QueryUsersParams) -> Result<CallToolResult, ToolError> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        let filter = params.name_filter.as_deref().filter(|f| !f.is_empty());

        let users = self.store.query(filter, limit).await?;
        info!("Query returned {} users", users.len());

        Ok(success_result(format_users(&users)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        describe::<QueryUsersParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for QueryUsersTool {
    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: QueryUsersParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::result_text;
    use crate::domains::users::SqliteUserStore;
    use serde_json::json;

    async fn tool() -> QueryUsersTool {
        let store = SqliteUserStore::with_sample_data().await.unwrap();
        QueryUsersTool::new(Arc::new(store))
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_query_all_by_default() {
        let result = tool().await.call(JsonObject::new()).await.unwrap();
        let text = result_text(&result);
        assert!(text.starts_with("Found 3 users:"));
        assert!(text.contains("Name: John Doe"));
        assert!(text.contains("Email: bob@example.com"));
    }

    #[tokio::test]
    async fn test_query_with_filter() {
        let result = tool()
            .await
            .call(args(json!({ "name_filter": "jane" })))
            .await
            .unwrap();
        let text = result_text(&result);
        assert!(text.starts_with("Found 1 users:"));
        assert!(text.contains("Name: Jane Smith"));
        assert!(!text.contains("John Doe"));
    }

    #[tokio::test]
    async fn test_query_limit_zero_is_empty_success() {
        let result = tool()
            .await
            .call(args(json!({ "limit": 0 })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "Found 0 users.");
    }

    #[tokio::test]
    async fn test_query_no_match_is_success() {
        let result = tool()
            .await
            .call(args(json!({ "name_filter": "Nobody" })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "Found 0 users.");
    }

    #[tokio::test]
    async fn test_query_rejects_negative_limit() {
        let err = tool()
            .await
            .call(args(json!({ "limit": -1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_schema_has_no_required_fields() {
        let tool = QueryUsersTool::to_tool();
        let required = tool
            .input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0);
        assert_eq!(required, 0);
    }
}

//! Add user tool definition.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{describe, success_result};
use crate::domains::tools::{ToolError, ToolHandler, parse_params, require_non_blank};
use crate::domains::users::UserStore;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddUserParams {
    /// Full name of the new user.
    #[schemars(description = "User full name")]
    pub name: String,

    /// Email address; must not already exist.
    #[schemars(description = "User email address")]
    pub email: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add user tool - inserts a user into the store.
pub struct AddUserTool {
    store: Arc<dyn UserStore>,
}

impl AddUserTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_user";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a new user to the database";

    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Insert the user. A duplicate email surfaces as a store error.
    #[instrument(skip_all, fields(email = %params.email))]
    pub async fn execute(&self, params: &AddUserParams) -> Result<CallToolResult, ToolError> {
        let name = require_non_blank("name", &params.name)?;
        let email = require_non_blank("email", &params.email)?;

        let id = self.store.insert(name, email).await?;
        info!("Added user {} with id {}", email, id);

        Ok(success_result(format!(
            "Successfully added user: {} ({}) with ID: {}",
            name, email, id
        )))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        describe::<AddUserParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for AddUserTool {
    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: AddUserParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::result_text;
    use crate::domains::users::SqliteUserStore;

    async fn setup() -> (AddUserTool, Arc<SqliteUserStore>) {
        let store = Arc::new(SqliteUserStore::with_sample_data().await.unwrap());
        (AddUserTool::new(store.clone()), store)
    }

    fn params(name: &str, email: &str) -> AddUserParams {
        AddUserParams {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_user() {
        let (tool, store) = setup().await;
        let result = tool
            .execute(&params("Ada Lovelace", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(
            result_text(&result),
            "Successfully added user: Ada Lovelace (ada@example.com) with ID: 4"
        );
        assert_eq!(store.all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_add_duplicate_email_fails() {
        let (tool, store) = setup().await;
        let err = tool
            .execute(&params("Other Jane", "jane@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Store(_)));
        assert_eq!(err.to_string(), "Email jane@example.com already exists");
        assert_eq!(store.all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_add_blank_fields_rejected() {
        let (tool, store) = setup().await;
        assert!(tool.execute(&params("", "x@example.com")).await.is_err());
        assert!(tool.execute(&params("X", "  ")).await.is_err());
        assert_eq!(store.all().await.unwrap().len(), 3);
    }

    #[test]
    fn test_schema_requires_name_and_email() {
        let tool = AddUserTool::to_tool();
        let mut required: Vec<String> = tool
            .input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .map(|a| a.iter().filter_map(|v| v.as_str().map(String::from)).collect())
            .unwrap_or_default();
        required.sort();
        assert_eq!(required, vec!["email", "name"]);
    }
}

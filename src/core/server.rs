//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry and the resource service.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `domains/tools/registry.rs`. Resources follow the same
//! layout under `domains/resources/`.
//! **Adding a new tool or resource does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    tools::{ToolError, ToolRegistry},
    users::{SqliteUserStore, UserStore},
};

/// The main MCP server handler.
///
/// Cloning is cheap: every clone shares the same registry, resource service
/// and user store, so one instance can serve any number of sessions.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Fixed set of tools, in listing order.
    tools: Arc<ToolRegistry>,

    /// Service for handling resource-related requests.
    resources: Arc<ResourceService>,
}

impl McpServer {
    /// Create a new MCP server backed by the given user store.
    pub fn new(config: Config, store: Arc<dyn UserStore>) -> crate::Result<Self> {
        let tools = ToolRegistry::new(&config, store.clone())?;
        let resources = ResourceService::new(store)?;

        Ok(Self {
            config: Arc::new(config),
            tools: Arc::new(tools),
            resources: Arc::new(resources),
        })
    }

    /// Create a server over a fresh in-memory store seeded with sample users.
    pub async fn with_sample_data(config: Config) -> crate::Result<Self> {
        let store = SqliteUserStore::with_sample_data().await?;
        Self::new(config, Arc::new(store))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // Transport-agnostic operations (shared by rmcp and the HTTP transport)
    // ========================================================================

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.list_tools()
    }

    /// Call a tool by name.
    ///
    /// Only an unknown name is an `Err`; failures inside the tool come back
    /// as an `isError` result.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        self.tools.call_tool(name, arguments).await
    }

    /// List all available resources.
    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources.list_resources()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        self.resources.read_resource(uri).await
    }

    fn instructions(&self) -> String {
        format!(
            "{} exposes tools ({}) and the db://users resource, a JSON snapshot of the user table.",
            self.name(),
            self.tools.tool_names().join(", ")
        )
    }
}

fn resource_error_to_mcp(err: ResourceError) -> McpError {
    if err.is_not_found() {
        McpError::resource_not_found(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        self.call_tool(&request.name, request.arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.list_resources(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.read_resource(&request.uri)
            .await
            .map_err(resource_error_to_mcp)
    }
}

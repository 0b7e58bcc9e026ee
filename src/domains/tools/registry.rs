//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - An ordered registry of all available tools
//! - Dispatch of tool calls by name
//! - The per-call isolation boundary that turns handler faults into
//!   `isError` results

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{debug, error, info, instrument, warn};

use super::definitions::{AddUserTool, CalculateTool, GetWeatherTool, QueryUsersTool};
use super::error::ToolError;
use super::handlers::ToolHandler;
use crate::core::config::Config;
use crate::domains::users::UserStore;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Tools are listed in registration order. The set is fixed once the
/// registry is built.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build the registry with every tool this server provides.
    pub fn new(config: &Config, store: Arc<dyn UserStore>) -> Result<Self, ToolError> {
        let mut registry = Self::default();
        registry.register(Arc::new(GetWeatherTool::new(config)?))?;
        registry.register(Arc::new(CalculateTool::new()))?;
        registry.register(Arc::new(QueryUsersTool::new(store.clone())))?;
        registry.register(Arc::new(AddUserTool::new(store)))?;

        info!("Registered {} tools", registry.handlers.len());
        Ok(registry)
    }

    /// Add a handler. Names must be unique.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let name = handler.name();
        if self.index.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }

        debug!("Registering tool: {}", name);
        self.index.insert(name, self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Get all tools as Tool models (metadata), in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.handlers.iter().map(|h| h.tool()).collect()
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Returns `Err(ToolError::NotFound)` for an unregistered name. Every
    /// fault raised by the handler itself, including a panic, is returned
    /// as an `Ok` result with `is_error` set and an `"Error: ..."` message.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let Some(&position) = self.index.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };
        let handler = &self.handlers[position];

        let outcome = AssertUnwindSafe(handler.call(arguments.unwrap_or_default()))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => {
                debug!("Tool {} succeeded", name);
                Ok(result)
            }
            Ok(Err(e)) => {
                warn!("Tool {} failed: {}", name, e);
                Ok(error_result(&e.to_string()))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", name, message);
                Ok(error_result(&format!("tool panicked: {message}")))
            }
        }
    }
}

/// Create the `isError` result for a handler-level fault.
pub fn error_result(message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

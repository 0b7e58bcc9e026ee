//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `ToolHandler` contract every tool implements
//! - `registry.rs` - Central tool registry and call dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define a params struct and implement `ToolHandler`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `ToolRegistry::new()`
//!
//! **No need to modify `server.rs`!** Listing and dispatch go through the registry.

pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use error::ToolError;
pub use handlers::{ToolHandler, parse_params, require_non_blank};
pub use registry::{ToolRegistry, error_result};

//! MCP Demo Server Library
//!
//! A Model Context Protocol server exposing a weather lookup, a calculator
//! and a small user database, organized by domains.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the protocol dispatcher and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: data resources that can be read by clients
//!   - **users**: the SQLite-backed user store shared by tools and resources
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_demo_server::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::with_sample_data(config).await?;
//!     // Start a transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};

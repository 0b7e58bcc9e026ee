//! Domains module containing business logic organized by bounded contexts.
//!
//! `tools` and `resources` are the two MCP capability surfaces; both read
//! and write through the `users` store.

pub mod resources;
pub mod tools;
pub mod users;

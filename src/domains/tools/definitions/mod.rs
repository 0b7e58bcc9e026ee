//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod math;
pub mod users;
pub mod weather;

pub use math::{CalculateParams, CalculateTool};
pub use users::{AddUserParams, AddUserTool, QueryUsersParams, QueryUsersTool};
pub use weather::{GetWeatherParams, GetWeatherTool};

//! User database tools module.
//!
//! - `query`: List users, optionally filtered by name
//! - `add`: Insert a new user
//!
//! Both tools share the `UserStore` injected at construction.

pub mod add;
pub mod query;

pub use add::{AddUserParams, AddUserTool};
pub use query::{QueryUsersParams, QueryUsersTool};

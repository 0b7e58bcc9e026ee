//! Users domain module.
//!
//! This module owns the user records that the `query_users` and `add_user`
//! tools and the `db://users` resource operate on.
//!
//! ## Architecture
//!
//! - `model.rs` - The `User` record
//! - `store.rs` - The `UserStore` trait handlers depend on
//! - `sqlite.rs` - In-memory SQLite implementation of `UserStore`
//! - `error.rs` - Store-specific error types

mod error;
mod model;
mod sqlite;
mod store;

pub use error::StoreError;
pub use model::User;
pub use sqlite::SqliteUserStore;
pub use store::{SAMPLE_USERS, UserStore};

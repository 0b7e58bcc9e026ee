//! The storage interface the user tools and resources depend on.

use async_trait::async_trait;

use super::error::StoreError;
use super::model::User;

/// Records seeded into a fresh store: `(name, email)`.
pub const SAMPLE_USERS: [(&str, &str); 3] = [
    ("John Doe", "john@example.com"),
    ("Jane Smith", "jane@example.com"),
    ("Bob Johnson", "bob@example.com"),
];

/// Backing store for user records.
///
/// Results are returned in insertion order. Implementations must serialize
/// writes so that concurrent inserts cannot break email uniqueness, and a
/// failed insert must leave no row behind.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return up to `limit` users whose name contains `name_filter`
    /// (ASCII case-insensitive), or all users when no filter is given.
    async fn query(&self, name_filter: Option<&str>, limit: u32) -> Result<Vec<User>, StoreError>;

    /// Insert a user and return its assigned id.
    ///
    /// Fails with [`StoreError::UniqueViolation`] if the email is taken.
    async fn insert(&self, name: &str, email: &str) -> Result<i64, StoreError>;

    /// Return every user.
    async fn all(&self) -> Result<Vec<User>, StoreError>;
}

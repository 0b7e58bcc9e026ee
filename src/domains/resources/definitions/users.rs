//! Users database resource definition.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::Resource;

use super::ResourceDefinition;
use crate::domains::resources::{ResourceError, ResourceHandler, build_resource};
use crate::domains::users::UserStore;

/// Snapshot of every user as a JSON array (dynamic).
pub struct UsersResource {
    store: Arc<dyn UserStore>,
}

impl UsersResource {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

impl ResourceDefinition for UsersResource {
    const URI: &'static str = "db://users";
    const NAME: &'static str = "Users Database";
    const DESCRIPTION: &'static str = "SQLite database containing user information";
    const MIME_TYPE: &'static str = "application/json";
}

#[async_trait]
impl ResourceHandler for UsersResource {
    fn resource(&self) -> Resource {
        build_resource::<Self>()
    }

    async fn read(&self) -> Result<String, ResourceError> {
        let users = self.store.all().await?;
        Ok(serde_json::to_string_pretty(&users)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::users::SqliteUserStore;

    #[test]
    fn test_users_metadata() {
        assert_eq!(UsersResource::URI, "db://users");
        assert_eq!(UsersResource::MIME_TYPE, "application/json");
    }

    #[tokio::test]
    async fn test_users_read_is_json_array() {
        let store = Arc::new(SqliteUserStore::with_sample_data().await.unwrap());
        let resource = UsersResource::new(store);

        assert!(resource.matches("db://users"));
        assert!(!resource.matches("db://users/1"));

        let text = resource.read().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let users = value.as_array().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0]["name"], "John Doe");
        assert_eq!(users[2]["email"], "bob@example.com");
    }
}

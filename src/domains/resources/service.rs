//! Resource service implementation.
//!
//! The ResourceService answers `resources/list` and `resources/read`.
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info, instrument, warn};

use super::error::ResourceError;
use super::handlers::ResourceHandler;
use super::registry::get_all_resources;
use crate::domains::users::UserStore;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Registered handlers, in listing order.
    handlers: Vec<Arc<dyn ResourceHandler>>,
}

impl ResourceService {
    /// Create a ResourceService with every registered resource.
    pub fn new(store: Arc<dyn UserStore>) -> Result<Self, ResourceError> {
        info!("Initializing ResourceService");

        let mut service = Self {
            handlers: Vec::new(),
        };
        for handler in get_all_resources(store) {
            service.register(handler)?;
        }
        Ok(service)
    }

    /// Register a resource handler. URIs must be unique.
    pub fn register(&mut self, handler: Arc<dyn ResourceHandler>) -> Result<(), ResourceError> {
        let uri = handler.resource().raw.uri;
        if self.handlers.iter().any(|h| h.matches(&uri)) {
            return Err(ResourceError::AlreadyRegistered(uri));
        }

        info!("Registering resource: {}", uri);
        self.handlers.push(handler);
        Ok(())
    }

    /// List all available resources.
    pub fn list_resources(&self) -> Vec<Resource> {
        self.handlers.iter().map(|h| h.resource()).collect()
    }

    /// Read a resource by exact URI.
    #[instrument(skip(self))]
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let Some(handler) = self.handlers.iter().find(|h| h.matches(uri)) else {
            warn!("Resource not found: {}", uri);
            return Err(ResourceError::not_found(uri));
        };

        let text = handler.read().await?;
        debug!("Read {} bytes from {}", text.len(), uri);

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: handler.resource().raw.mime_type,
                text,
                meta: None,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::users::SqliteUserStore;
    use crate::domains::resources::definitions::UsersResource;

    async fn service() -> (ResourceService, Arc<SqliteUserStore>) {
        let store = Arc::new(SqliteUserStore::with_sample_data().await.unwrap());
        (ResourceService::new(store.clone()).unwrap(), store)
    }

    fn text_of(result: &ReadResourceResult) -> (&str, Option<&str>, &str) {
        match &result.contents[0] {
            ResourceContents::TextResourceContents {
                uri,
                mime_type,
                text,
                ..
            } => (uri.as_str(), mime_type.as_deref(), text.as_str()),
            other => panic!("unexpected contents: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_resources_is_stable() {
        let (service, _) = service().await;
        let first = serde_json::to_value(service.list_resources()).unwrap();
        let second = serde_json::to_value(service.list_resources()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0]["uri"], "db://users");
        assert_eq!(first[0]["mimeType"], "application/json");
    }

    #[tokio::test]
    async fn test_read_users_resource() {
        let (service, store) = service().await;
        store.insert("Ada Lovelace", "ada@example.com").await.unwrap();

        let result = service.read_resource("db://users").await.unwrap();
        let (uri, mime_type, text) = text_of(&result);
        assert_eq!(uri, "db://users");
        assert_eq!(mime_type, Some("application/json"));

        let users: Vec<serde_json::Value> = serde_json::from_str(text).unwrap();
        assert_eq!(users.len(), 4);
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let (service, _) = service().await;
        let err = service.read_resource("db://orders").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_uri_rejected() {
        let (mut service, store) = service().await;
        let err = service
            .register(Arc::new(UsersResource::new(store)))
            .unwrap_err();
        assert!(matches!(err, ResourceError::AlreadyRegistered(_)));
        assert_eq!(service.list_resources().len(), 1);
    }
}

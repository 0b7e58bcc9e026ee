//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use std::sync::Arc;

use rmcp::model::{AnnotateAble, RawResource, Resource};

use super::definitions::{ResourceDefinition, UsersResource};
use super::handlers::ResourceHandler;
use crate::domains::users::UserStore;

/// Build an annotated resource descriptor from a definition.
pub fn build_resource<R: ResourceDefinition>() -> Resource {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());
    raw.no_annotation()
}

/// Get all registered resource handlers, in listing order.
///
/// This is the central place where all resources are registered.
pub fn get_all_resources(store: Arc<dyn UserStore>) -> Vec<Arc<dyn ResourceHandler>> {
    vec![Arc::new(UsersResource::new(store))]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![UsersResource::URI]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::users::SqliteUserStore;

    #[tokio::test]
    async fn test_get_all_resources() {
        let store = Arc::new(SqliteUserStore::in_memory().await.unwrap());
        let resources = get_all_resources(store);

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource().raw.uri.clone())
            .collect();
        assert_eq!(uris, resource_uris());
    }

    #[test]
    fn test_build_resource() {
        let resource = build_resource::<UsersResource>();
        assert_eq!(resource.raw.uri, "db://users");
        assert_eq!(resource.raw.name, "Users Database");
        assert_eq!(resource.raw.mime_type.as_deref(), Some("application/json"));
    }
}

//! Resource handlers module.
//!
//! A resource handler produces the text content of one registered resource.
//! The service looks handlers up by exact URI and wraps their output with the
//! declared mime type.

use async_trait::async_trait;
use rmcp::model::Resource;

use super::error::ResourceError;

/// Trait for implementing resource content providers.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// The descriptor advertised in `resources/list`.
    fn resource(&self) -> Resource;

    /// Check if this handler serves the given URI (exact match).
    fn matches(&self, uri: &str) -> bool {
        self.resource().raw.uri == uri
    }

    /// Produce the current content of the resource.
    async fn read(&self) -> Result<String, ResourceError>;
}

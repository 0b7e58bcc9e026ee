//! Resource-specific error types.

use thiserror::Error;

use crate::domains::users::StoreError;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A resource with the same URI is already registered.
    #[error("Resource already registered: {0}")]
    AlreadyRegistered(String),

    /// The backing store failed while producing the content.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The content could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Whether this error means the URI is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

//! Resource definitions module.
//!
//! Each resource is defined in its own file with:
//! - URI and metadata (`ResourceDefinition`)
//! - A content provider (`ResourceHandler`)
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement `ResourceDefinition` and `ResourceHandler`
//! 3. Export it here
//! 4. Register in `registry.rs`

pub mod users;

pub use users::UsersResource;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;
}

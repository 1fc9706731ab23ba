//! Core trait for resource storage backends

use crate::{models::Resource, Result};
use async_trait::async_trait;

/// Durable storage for FHIR resources
///
/// The store is the system of record: a create is successful exactly when
/// the `put` succeeds, independent of what the search index does with the
/// document afterwards. Any backend (PostgreSQL, in-memory, etc.) can
/// implement this trait; implementations must be safe for concurrent use
/// from all request handlers without external locking.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Persist a new resource
    ///
    /// IDs are unique across the whole store regardless of resource type;
    /// a duplicate id is a storage error.
    async fn put(&self, resource: Resource) -> Result<()>;

    /// Read a resource by type and id
    ///
    /// Both fields must match: an existing id filed under a different
    /// resource type is `None`. Soft-deleted resources are `None` as well.
    async fn get(&self, resource_type: &str, id: &str) -> Result<Option<Resource>>;
}

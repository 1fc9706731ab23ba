//! In-memory resource store
//!
//! Backend used by the integration tests; behaves like the PostgreSQL
//! store for the operations this server exposes.

use crate::{db::traits::ResourceStore, models::Resource, Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryResourceStore {
    // Keyed by id alone: ids are unique across resource types.
    resources: RwLock<HashMap<String, Resource>>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn put(&self, resource: Resource) -> Result<()> {
        let mut resources = self.resources.write().await;
        if resources.contains_key(&resource.id) {
            return Err(Error::Storage(format!(
                "duplicate resource id: {}",
                resource.id
            )));
        }
        resources.insert(resource.id.clone(), resource);
        Ok(())
    }

    async fn get(&self, resource_type: &str, id: &str) -> Result<Option<Resource>> {
        let resources = self.resources.read().await;
        Ok(resources
            .get(id)
            .filter(|r| r.resource_type == resource_type && r.deleted_at.is_none())
            .cloned())
    }
}

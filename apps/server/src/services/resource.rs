//! Resource use cases: create, read, search

use crate::{
    db::ResourceStore,
    models::{Resource, SearchSetBundle},
    search::{query, SearchIndex},
    services::IndexingPipeline,
    Error, Result,
};
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Orchestrates the resource use cases
///
/// The store write is synchronous and authoritative; the index write is
/// dispatched fire-and-forget after it. Search never consults the store.
#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn ResourceStore>,
    search: Arc<dyn SearchIndex>,
    indexing: IndexingPipeline,
}

impl ResourceService {
    pub fn new(store: Arc<dyn ResourceStore>, search: Arc<dyn SearchIndex>) -> Self {
        let indexing = IndexingPipeline::new(Arc::clone(&search));
        Self {
            store,
            search,
            indexing,
        }
    }

    /// Create a resource
    ///
    /// Validates the envelope fields, assigns an id when the client did
    /// not supply one, persists, then schedules indexing. Success is
    /// defined solely by the store write; the returned body is what got
    /// stored, id included.
    pub async fn create(&self, resource_type: &str, mut body: JsonValue) -> Result<JsonValue> {
        let object = body
            .as_object()
            .ok_or_else(|| Error::Validation("request body must be a JSON object".to_string()))?;

        if object.get("resourceType").and_then(|rt| rt.as_str()) != Some(resource_type) {
            return Err(Error::Validation(
                "resourceType mismatch or missing".to_string(),
            ));
        }

        let client_id = object
            .get("id")
            .and_then(|id| id.as_str())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let id = match client_id {
            Some(id) => id,
            None => {
                let generated = Uuid::new_v4().to_string();
                if let Some(object) = body.as_object_mut() {
                    object.insert("id".to_string(), JsonValue::String(generated.clone()));
                }
                generated
            }
        };

        let now = Utc::now();
        let resource = Resource {
            id: id.clone(),
            resource_type: resource_type.to_string(),
            content: body.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.store.put(resource).await?;

        // Fire-and-forget: the response does not wait for, or depend on,
        // the index write.
        self.indexing.dispatch(resource_type, &id, body.clone());

        Ok(body)
    }

    /// Read a resource by type and id
    ///
    /// Returns the stored content exactly as persisted. A known id under
    /// the wrong resource type is not found.
    pub async fn read(&self, resource_type: &str, id: &str) -> Result<JsonValue> {
        let resource = self.store.get(resource_type, id).await?;

        match resource {
            Some(resource) => Ok(resource.content),
            None => Err(Error::ResourceNotFound {
                resource_type: resource_type.to_string(),
                id: id.to_string(),
            }),
        }
    }

    /// Search resources of one type
    ///
    /// Answers from the index alone; entries are the raw indexed documents
    /// and may be stale relative to the store.
    pub async fn search(
        &self,
        resource_type: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<SearchSetBundle> {
        let structured = query::translate(params);
        let partition = resource_type.to_lowercase();

        let hits = self.search.query(&partition, &structured).await?;

        Ok(SearchSetBundle::searchset(hits.total, hits.documents))
    }
}

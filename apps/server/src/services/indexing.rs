//! Best-effort propagation of stored resources into the search index

use crate::search::SearchIndex;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Asynchronous pipeline feeding the search index
///
/// Dispatch spawns a detached task per document: the caller gets no handle
/// and never observes the outcome. A failed write is logged and dropped,
/// never retried; the resource stays durable in the store but invisible to
/// search until a future reindex. Tasks still in flight at shutdown may be
/// dropped.
#[derive(Clone)]
pub struct IndexingPipeline {
    search: Arc<dyn SearchIndex>,
}

impl IndexingPipeline {
    pub fn new(search: Arc<dyn SearchIndex>) -> Self {
        Self { search }
    }

    /// Schedule an index write for a just-stored resource
    ///
    /// Returns immediately; the write happens on a background task. The
    /// partition is the lower-cased resource type.
    pub fn dispatch(&self, resource_type: &str, id: &str, document: JsonValue) {
        let search = Arc::clone(&self.search);
        let partition = resource_type.to_lowercase();
        let id = id.to_string();

        tokio::spawn(async move {
            match search.index_document(&partition, &id, &document).await {
                Ok(()) => {
                    tracing::debug!(partition = %partition, id = %id, "Indexed document");
                }
                Err(e) => {
                    tracing::warn!(
                        partition = %partition,
                        id = %id,
                        error = %e,
                        "Indexing failed; resource is stored but not searchable until reindexed"
                    );
                }
            }
        });
    }
}

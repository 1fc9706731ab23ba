//! Core trait for search index backends

use crate::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Documents matching a search query, plus the backend-reported total
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    pub documents: Vec<JsonValue>,
    pub total: i64,
}

/// Secondary, eventually-consistent document index
///
/// Partitions are named by the lower-cased resource type. Implementations
/// must be safe to share across all request handlers.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Write a document into a partition under the given id
    ///
    /// The write must be visible to the next query against the partition
    /// (immediate refresh), trading indexing throughput for
    /// search-visibility.
    async fn index_document(&self, partition: &str, id: &str, document: &JsonValue) -> Result<()>;

    /// Execute a structured query against a partition
    async fn query(&self, partition: &str, query: &JsonValue) -> Result<SearchHits>;
}

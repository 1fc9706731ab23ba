//! In-memory search index
//!
//! Backend used by the integration tests. Evaluates the translated
//! match-all / bool-must queries over stored documents, approximating how
//! Elasticsearch matches flat fields.

use crate::{
    search::traits::{SearchHits, SearchIndex},
    Error, Result,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemorySearchIndex {
    // partition -> id -> document; BTreeMap keeps result order stable.
    partitions: RwLock<HashMap<String, BTreeMap<String, JsonValue>>>,
}

impl MemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    async fn index_document(&self, partition: &str, id: &str, document: &JsonValue) -> Result<()> {
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(partition.to_string())
            .or_default()
            .insert(id.to_string(), document.clone());
        Ok(())
    }

    async fn query(&self, partition: &str, query: &JsonValue) -> Result<SearchHits> {
        let partitions = self.partitions.read().await;

        let documents: Vec<JsonValue> = partitions
            .get(partition)
            .map(|docs| {
                docs.values()
                    .filter(|doc| matches(doc, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let total = documents.len() as i64;
        Ok(SearchHits { documents, total })
    }
}

fn matches(document: &JsonValue, query: &JsonValue) -> bool {
    if query.pointer("/query/match_all").is_some() {
        return true;
    }

    if let Some(must) = query.pointer("/query/bool/must").and_then(|m| m.as_array()) {
        return must.iter().all(|clause| clause_matches(document, clause));
    }

    false
}

fn clause_matches(document: &JsonValue, clause: &JsonValue) -> bool {
    let Some(fields) = clause.get("match").and_then(|m| m.as_object()) else {
        return false;
    };

    fields
        .iter()
        .all(|(field, expected)| field_matches(document.get(field), expected))
}

fn field_matches(actual: Option<&JsonValue>, expected: &JsonValue) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    // Query values arrive as strings; compare scalar fields through their
    // string rendering the way a match query would.
    match (actual, expected) {
        (JsonValue::String(a), JsonValue::String(e)) => a == e,
        (JsonValue::Number(a), JsonValue::String(e)) => a.to_string() == *e,
        (JsonValue::Bool(a), JsonValue::String(e)) => a.to_string() == *e,
        (a, e) => a == e,
    }
}

/// Index wrapper that fails every operation
///
/// Stands in for an unreachable search backend in failure-isolation tests.
#[derive(Default)]
pub struct FailingSearchIndex;

#[async_trait]
impl SearchIndex for FailingSearchIndex {
    async fn index_document(
        &self,
        partition: &str,
        id: &str,
        _document: &JsonValue,
    ) -> Result<()> {
        Err(Error::Search(format!(
            "index backend unavailable (while indexing {partition}/{id})"
        )))
    }

    async fn query(&self, partition: &str, _query: &JsonValue) -> Result<SearchHits> {
        Err(Error::Search(format!(
            "index backend unavailable (while searching {partition})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::translate;
    use serde_json::json;

    async fn seeded() -> MemorySearchIndex {
        let index = MemorySearchIndex::new();
        index
            .index_document(
                "patient",
                "p1",
                &json!({"resourceType": "Patient", "id": "p1", "name": "Alice", "city": "Zurich"}),
            )
            .await
            .expect("index");
        index
            .index_document(
                "patient",
                "p2",
                &json!({"resourceType": "Patient", "id": "p2", "name": "Bob", "city": "Zurich"}),
            )
            .await
            .expect("index");
        index
    }

    #[tokio::test]
    async fn match_all_returns_the_whole_partition() {
        let index = seeded().await;
        let hits = index
            .query("patient", &translate(&BTreeMap::new()))
            .await
            .expect("query");
        assert_eq!(hits.total, 2);
    }

    #[tokio::test]
    async fn conjunction_requires_every_clause() {
        let index = seeded().await;

        let mut params = BTreeMap::new();
        params.insert("city".to_string(), "Zurich".to_string());
        params.insert("name".to_string(), "Alice".to_string());

        let hits = index
            .query("patient", &translate(&params))
            .await
            .expect("query");
        assert_eq!(hits.total, 1);
        assert_eq!(hits.documents[0]["id"], "p1");

        params.insert("name".to_string(), "Nobody".to_string());
        let hits = index
            .query("patient", &translate(&params))
            .await
            .expect("query");
        assert_eq!(hits.total, 0);
    }

    #[tokio::test]
    async fn partitions_are_isolated() {
        let index = seeded().await;
        let hits = index
            .query("observation", &translate(&BTreeMap::new()))
            .await
            .expect("query");
        assert_eq!(hits.total, 0);
    }
}

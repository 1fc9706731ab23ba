//! Elasticsearch-backed search index

use crate::{
    config::SearchConfig,
    search::traits::{SearchHits, SearchIndex},
    Error, Result,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Search index backed by an Elasticsearch cluster
///
/// Partitions map to Elasticsearch indices. The HTTP client is built once
/// and shared; reqwest pools connections internally.
#[derive(Clone)]
pub struct ElasticsearchIndex {
    http: reqwest::Client,
    base_url: String,
}

impl ElasticsearchIndex {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| Error::Search(format!("failed to build search client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Verify the cluster is reachable
    ///
    /// Called once at startup so a misconfigured search backend fails the
    /// boot instead of every later search request.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| Error::Search(format!("search backend unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Search(format!(
                "search backend returned {} on ping",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn index_document(&self, partition: &str, id: &str, document: &JsonValue) -> Result<()> {
        let url = format!("{}/{}/_doc/{}", self.base_url, partition, id);

        let response = self
            .http
            .put(&url)
            .query(&[("refresh", "true")])
            .json(document)
            .send()
            .await
            .map_err(|e| Error::Search(format!("index request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Search(format!(
                "indexing document {partition}/{id} returned {status}"
            )));
        }

        Ok(())
    }

    async fn query(&self, partition: &str, query: &JsonValue) -> Result<SearchHits> {
        let url = format!("{}/{}/_search", self.base_url, partition);

        let response = self
            .http
            .post(&url)
            .query(&[("track_total_hits", "true")])
            .json(query)
            .send()
            .await
            .map_err(|e| Error::Search(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Search(format!(
                "search on partition {partition} returned {status}"
            )));
        }

        let body: JsonValue = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("invalid search response: {e}")))?;

        parse_search_response(&body)
    }
}

/// Pull `_source` documents and the total hit count out of a search response
fn parse_search_response(body: &JsonValue) -> Result<SearchHits> {
    let hits = body
        .pointer("/hits/hits")
        .and_then(|h| h.as_array())
        .ok_or_else(|| Error::Search("search response is missing hits.hits".to_string()))?;

    let documents = hits
        .iter()
        .filter_map(|hit| hit.get("_source"))
        .cloned()
        .collect();

    let total = body
        .pointer("/hits/total/value")
        .and_then(|t| t.as_i64())
        .ok_or_else(|| Error::Search("search response is missing hits.total.value".to_string()))?;

    Ok(SearchHits { documents, total })
}

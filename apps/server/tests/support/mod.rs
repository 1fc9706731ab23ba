//! Shared harness for integration tests
//!
//! Builds the real router over in-memory backends, so tests exercise the
//! full request path (auth gate, handlers, service, translator) without a
//! running PostgreSQL or Elasticsearch.

#![allow(dead_code)]

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt as _;
use zarish::{
    api::create_router,
    db::MemoryResourceStore,
    search::{FailingSearchIndex, MemorySearchIndex, SearchIndex},
    AppState, Config,
};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_search(Arc::new(MemorySearchIndex::new()))
    }

    /// App whose search backend fails every call
    pub fn with_failing_search() -> Self {
        Self::with_search(Arc::new(FailingSearchIndex))
    }

    fn with_search(search: Arc<dyn SearchIndex>) -> Self {
        init_tracing();

        let config = Config::default();
        let state = AppState::with_backends(config, Arc::new(MemoryResourceStore::new()), search);
        let router = create_router(state.clone());

        Self { router, state }
    }

    /// Issue a request carrying a bearer token
    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_headers(
            method,
            path_and_query,
            body,
            &[("authorization", "Bearer test-token")],
        )
        .await
    }

    /// Issue a request without any Authorization header
    pub async fn request_unauthenticated(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_headers(method, path_and_query, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("content-type", "application/json");

        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }

        let request = builder
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("execute request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("collect response body")?;

        Ok((status, headers, body))
    }
}

pub fn to_json_body(value: &serde_json::Value) -> Bytes {
    Bytes::from(serde_json::to_vec(value).expect("serialize test body"))
}

pub fn parse_body(body: &Bytes) -> anyhow::Result<serde_json::Value> {
    serde_json::from_slice(body).context("parse response body")
}

/// Poll a search until the bundle reports the expected total
///
/// Indexing runs on a detached task behind the create response, so tests
/// have to absorb that hop instead of asserting immediately.
pub async fn wait_for_search_total(
    app: &TestApp,
    path_and_query: &str,
    expected: i64,
) -> anyhow::Result<serde_json::Value> {
    let mut last = serde_json::Value::Null;

    for _ in 0..100 {
        let (status, _headers, body) = app.request(Method::GET, path_and_query, None).await?;
        if status == StatusCode::OK {
            let bundle = parse_body(&body)?;
            if bundle["total"].as_i64() == Some(expected) {
                return Ok(bundle);
            }
            last = bundle;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    anyhow::bail!("search at {path_and_query} never reached total={expected}; last bundle: {last}")
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "zarish=info".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}

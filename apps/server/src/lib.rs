//! Zarish Sphere FHIR Server - Rust implementation
//!
//! A lightweight FHIR R4 resource server:
//! - Create/read of arbitrary typed JSON resources over PostgreSQL
//! - Elasticsearch-backed type-level search
//! - Best-effort asynchronous search indexing behind the write path

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;

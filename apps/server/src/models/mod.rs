//! Domain models for FHIR resource storage and search

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A stored FHIR resource with metadata
///
/// The body is opaque to the server: only `id` and `resource_type` are
/// pulled out of the document, and both are kept duplicated inside
/// `content` for the client's convenience.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Resource ID (unique across the store regardless of type)
    pub id: String,

    /// Resource type (e.g., "Patient", "Observation")
    pub resource_type: String,

    /// Full resource JSON
    pub content: JsonValue,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker. Reserved: no delete interaction exists yet,
    /// but reads already filter on it.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The `searchset` Bundle envelope returned by search operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSetBundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(rename = "type")]
    pub bundle_type: String,

    /// Index-reported count of matching documents
    pub total: i64,

    /// Raw indexed documents. These reflect index state, which may lag the
    /// store or miss not-yet-indexed resources entirely.
    pub entry: Vec<JsonValue>,
}

impl SearchSetBundle {
    pub fn searchset(total: i64, entry: Vec<JsonValue>) -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            bundle_type: "searchset".to_string(),
            total,
            entry,
        }
    }
}

//! Create and read handlers

use crate::{state::AppState, Error, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value as JsonValue;

/// POST /fhir/R4/:resource_type
///
/// Responds 201 with the stored document. The response never implies the
/// resource is searchable yet; indexing runs behind the response.
pub async fn create_resource(
    State(state): State<AppState>,
    Path(resource_type): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let body: JsonValue = serde_json::from_slice(&body)
        .map_err(|e| Error::Validation(format!("invalid JSON body: {e}")))?;

    let created = state.resources.create(&resource_type, body).await?;

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// GET /fhir/R4/:resource_type/:id
pub async fn read_resource(
    State(state): State<AppState>,
    Path((resource_type, id)): Path<(String, String)>,
) -> Result<Json<JsonValue>> {
    let content = state.resources.read(&resource_type, &id).await?;
    Ok(Json(content))
}

//! Search handler
//!
//! Type-level search: GET /fhir/R4/:resource_type?k=v&...

use crate::{models::SearchSetBundle, state::AppState, Result};
use axum::{
    extract::{Path, RawQuery, State},
    response::Json,
};
use std::collections::BTreeMap;

pub async fn search_type(
    State(state): State<AppState>,
    Path(resource_type): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<SearchSetBundle>> {
    let params = parse_query_first_wins(raw_query.as_deref());
    let bundle = state.resources.search(&resource_type, &params).await?;
    Ok(Json(bundle))
}

/// Decode the query string into single-valued parameters
///
/// A repeated key keeps its first occurrence.
fn parse_query_first_wins(raw_query: Option<&str>) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    if let Some(raw_query) = raw_query {
        for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()).into_owned() {
            params.entry(key).or_insert(value);
        }
    }

    params
}

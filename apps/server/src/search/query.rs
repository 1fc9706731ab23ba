//! Query translation
//!
//! Maps the flat key/value search parameters of a request into a
//! structured boolean query for the index. Pure: no side effects, and the
//! same parameter map always yields the same query. Parameters arrive in a
//! `BTreeMap`, so clause order is fixed by key order rather than by
//! whatever iteration order the caller's map happened to have.

use serde_json::{json, Value as JsonValue};
use std::collections::BTreeMap;

/// Build the structured search query for a parameter map
///
/// An empty map matches everything. A non-empty map becomes a conjunction
/// of one field-match clause per pair: every supplied parameter must
/// match. There are no modifiers, prefixes, or ranges; each key is matched
/// literally against the indexed document.
pub fn translate(params: &BTreeMap<String, String>) -> JsonValue {
    if params.is_empty() {
        return json!({
            "query": { "match_all": {} }
        });
    }

    let clauses: Vec<JsonValue> = params
        .iter()
        .map(|(field, value)| json!({ "match": { field: value } }))
        .collect();

    json!({
        "query": {
            "bool": { "must": clauses }
        }
    })
}

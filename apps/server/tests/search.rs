//! Search interaction tests
//!
//! Search answers from the index partition for the resource type, filled
//! asynchronously behind create responses; tests poll for visibility
//! instead of asserting immediately after a create.

mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;
use support::{parse_body, to_json_body, wait_for_search_total, TestApp};

async fn create(app: &TestApp, resource_type: &str, body: serde_json::Value) -> anyhow::Result<()> {
    let (status, _headers, _body) = app
        .request(
            Method::POST,
            &format!("/fhir/R4/{resource_type}"),
            Some(to_json_body(&body)),
        )
        .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create returned {status}");
    Ok(())
}

#[tokio::test]
async fn match_all_returns_every_indexed_document() -> anyhow::Result<()> {
    let app = TestApp::new();

    for id in ["p1", "p2", "p3"] {
        create(
            &app,
            "Patient",
            json!({"resourceType": "Patient", "id": id, "name": "Alice"}),
        )
        .await?;
    }

    let bundle = wait_for_search_total(&app, "/fhir/R4/Patient", 3).await?;

    assert_eq!(bundle["resourceType"], "Bundle");
    assert_eq!(bundle["type"], "searchset");
    assert_eq!(bundle["total"], 3);

    let entries = bundle["entry"].as_array().expect("entry array");
    let mut ids: Vec<&str> = entries
        .iter()
        .map(|e| e["id"].as_str().expect("entry id"))
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);

    Ok(())
}

#[tokio::test]
async fn parameters_filter_conjunctively() -> anyhow::Result<()> {
    let app = TestApp::new();

    create(
        &app,
        "Patient",
        json!({"resourceType": "Patient", "id": "p1", "name": "Alice", "city": "Zurich"}),
    )
    .await?;
    create(
        &app,
        "Patient",
        json!({"resourceType": "Patient", "id": "p2", "name": "Bob", "city": "Zurich"}),
    )
    .await?;

    wait_for_search_total(&app, "/fhir/R4/Patient", 2).await?;

    let (status, _headers, body) = app
        .request(Method::GET, "/fhir/R4/Patient?name=Alice", None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let bundle = parse_body(&body)?;
    assert_eq!(bundle["total"], 1);
    assert_eq!(bundle["entry"][0]["id"], "p1");

    // Every parameter must match: one unmatched key empties the result.
    let (status, _headers, body) = app
        .request(
            Method::GET,
            "/fhir/R4/Patient?name=Alice&city=Nowhere",
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body(&body)?["total"], 0);

    Ok(())
}

#[tokio::test]
async fn repeated_parameters_keep_the_first_value() -> anyhow::Result<()> {
    let app = TestApp::new();

    create(
        &app,
        "Patient",
        json!({"resourceType": "Patient", "id": "p1", "name": "Alice"}),
    )
    .await?;
    create(
        &app,
        "Patient",
        json!({"resourceType": "Patient", "id": "p2", "name": "Bob"}),
    )
    .await?;

    wait_for_search_total(&app, "/fhir/R4/Patient", 2).await?;

    let (status, _headers, body) = app
        .request(Method::GET, "/fhir/R4/Patient?name=Alice&name=Bob", None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let bundle = parse_body(&body)?;
    assert_eq!(bundle["total"], 1);
    assert_eq!(bundle["entry"][0]["name"], "Alice");

    Ok(())
}

#[tokio::test]
async fn partitions_are_scoped_by_resource_type() -> anyhow::Result<()> {
    let app = TestApp::new();

    create(
        &app,
        "Patient",
        json!({"resourceType": "Patient", "id": "p1"}),
    )
    .await?;
    create(
        &app,
        "Observation",
        json!({"resourceType": "Observation", "id": "o1"}),
    )
    .await?;

    let bundle = wait_for_search_total(&app, "/fhir/R4/Observation", 1).await?;
    assert_eq!(bundle["entry"][0]["id"], "o1");

    let bundle = wait_for_search_total(&app, "/fhir/R4/Patient", 1).await?;
    assert_eq!(bundle["entry"][0]["id"], "p1");

    Ok(())
}

#[tokio::test]
async fn index_failure_never_affects_the_create_response() -> anyhow::Result<()> {
    let app = TestApp::with_failing_search();

    let patient = json!({"resourceType": "Patient", "id": "p1", "name": "Alice"});
    let (status, _headers, body) = app
        .request(Method::POST, "/fhir/R4/Patient", Some(to_json_body(&patient)))
        .await?;

    // The create is defined by the store write alone.
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse_body(&body)?, patient);

    // The durable copy is readable...
    let (status, _headers, _body) = app
        .request(Method::GET, "/fhir/R4/Patient/p1", None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    // ...while search reports the backend failure.
    let (status, _headers, body) = app
        .request(Method::GET, "/fhir/R4/Patient", None)
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse_body(&body)?["resourceType"], "OperationOutcome");

    Ok(())
}

//! OpenAPI document integration tests.

mod common;

use common::TestHarness;
use serde_json::Value;

#[tokio::test]
async fn openapi_is_public_and_lists_every_operation() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: Value = response.json();

    assert_eq!(doc["info"]["title"], "School API");
    assert_eq!(doc["info"]["version"], "1.0.0");

    let collection = &doc["paths"]["/api/schools"];
    assert!(collection["get"].is_object());
    assert!(collection["post"].is_object());

    let item = &doc["paths"]["/api/schools/{id}"];
    assert!(item["get"].is_object());
    assert!(item["put"].is_object());
    assert!(item["delete"].is_object());

    assert_eq!(collection["post"]["tags"][0], "Schools");
    assert!(item["delete"]["responses"]["404"].is_object());
}

#[tokio::test]
async fn openapi_declares_bearer_auth() {
    let harness = TestHarness::new();

    let doc: Value = harness.server.get("/api-docs/openapi.json").await.json();

    let scheme = &doc["components"]["securitySchemes"]["bearerAuth"];
    assert_eq!(scheme["type"], "http");
    assert_eq!(scheme["scheme"], "bearer");
    assert!(doc["paths"]["/api/schools"]["get"]["security"].is_array());
    assert!(doc["components"]["schemas"]["School"]["properties"]["_id"].is_object());
}

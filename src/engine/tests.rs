//! Tests for the engine module

use super::*;
use crate::adapters::lookup;
use crate::types::BackoffType;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connection_vars(server: &MockServer) -> InvocationVars {
    InvocationVars::from_json(json!({
        "pipedrive_connection": {"access_token": "tok", "api_base_uri": server.uri()}
    }))
    .unwrap()
}

fn runner(name: &str) -> AdapterRunner {
    AdapterRunner::new(lookup(name).unwrap()).retry_policy(RetryPolicy::standard().backoff(
        BackoffType::Exponential,
        Duration::from_millis(1),
        Duration::from_millis(10),
    ))
}

fn page(data: Value, more: bool, next: Option<u64>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": data,
        "additional_data": {
            "pagination": {"more_items_in_collection": more, "next_start": next}
        }
    }))
}

async fn run_to_string(runner: &AdapterRunner, vars: &InvocationVars, input: Value) -> (RunStats, String) {
    let mut out = Vec::new();
    let stats = runner.run(vars, &input, &mut out).await.unwrap();
    (stats, String::from_utf8(out).unwrap())
}

// ============================================================================
// Credential Tests
// ============================================================================

#[tokio::test]
async fn test_table_adapter_missing_credentials_emits_empty_payload() {
    let mut out = Vec::new();
    let stats = runner("pipedrive-list-deals")
        .run(&InvocationVars::default(), &json!([]), &mut out)
        .await
        .unwrap();

    assert_eq!(stats.outcome, RunOutcome::MissingCredentials);
    assert_eq!(String::from_utf8(out).unwrap(), "[[\"\"]]\n");
}

#[tokio::test]
async fn test_stream_adapter_missing_credentials_fails() {
    let mut out = Vec::new();
    let err = runner("pipedrive-deals")
        .run(&InvocationVars::default(), &json!([]), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingConfigField { .. }));
    assert!(out.is_empty());
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_property_rejected_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(page(json!([]), false, None))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = runner("pipedrive-deals")
        .run(&connection_vars(&server), &json!(["id,website"]), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownProperty { ref property, .. } if property == "website"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_non_array_input_rejected() {
    let server = MockServer::start().await;
    let mut out = Vec::new();
    let err = runner("pipedrive-deals")
        .run(&connection_vars(&server), &json!({"properties": "*"}), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[tokio::test]
async fn test_filter_cannot_override_adapter_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(page(json!([]), false, None))
        .expect(0)
        .mount(&server)
        .await;

    for (name, filter) in [
        ("pipedrive-deals", "limit=1"),
        ("pipedrive-deals", "start=1000"),
        ("pipedrive-deals", "api_token=other"),
        ("pipedrive-activity", "user_id=7"),
    ] {
        let mut out = Vec::new();
        let err = runner(name)
            .run(&connection_vars(&server), &json!(["*", filter]), &mut out)
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidParam { ref param, .. } if param == "filter"),
            "{name} {filter}: {err:?}"
        );
        assert!(out.is_empty());
    }
}

// ============================================================================
// Streaming Tests
// ============================================================================

#[tokio::test]
async fn test_stream_projection_and_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .and(header("authorization", "Bearer tok"))
        .and(query_param("status", "open"))
        .respond_with(page(
            json!([
                {"id": 1, "title": "A", "value": 100, "org_id": {"name": "Acme"}},
                {"id": 2, "title": "B", "value": 0, "org_id": null}
            ]),
            false,
            None,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let (stats, text) = run_to_string(
        &runner("pipedrive-deals"),
        &connection_vars(&server),
        json!(["org_name, title,ID", "status=open"]),
    )
    .await;

    assert_eq!(stats.rows_emitted, 2);
    assert_eq!(
        text,
        concat!(
            r#"{"id":1,"title":"A","org_name":"Acme"}"#,
            "\n",
            r#"{"id":2,"title":"B","org_name":null}"#,
            "\n"
        )
    );
}

#[tokio::test]
async fn test_stream_follows_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/persons"))
        .and(query_param_is_missing("start"))
        .respond_with(page(json!([{"id": 1}, {"id": 2}]), true, Some(2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/persons"))
        .and(query_param("start", "2"))
        .respond_with(page(json!([{"id": 3}]), false, None))
        .expect(1)
        .mount(&server)
        .await;

    let (stats, text) = run_to_string(
        &runner("pipedrive-people").page_size(2),
        &connection_vars(&server),
        json!(["id"]),
    )
    .await;

    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.records_read, 3);
    assert_eq!(text, "{\"id\":1}\n{\"id\":2}\n{\"id\":3}\n");
}

#[tokio::test]
async fn test_stream_products_fan_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(page(
            json!([
                {"id": 1, "prices": [
                    {"id": 10, "price": 5, "currency": "USD"},
                    {"id": 11, "price": 4, "currency": "EUR"}
                ]},
                {"id": 2, "prices": []}
            ]),
            false,
            None,
        ))
        .mount(&server)
        .await;

    let (stats, text) = run_to_string(
        &runner("pipedrive-products"),
        &connection_vars(&server),
        json!([["id", "price_id", "currency"]]),
    )
    .await;

    assert_eq!(stats.records_read, 2);
    assert_eq!(stats.rows_emitted, 3);
    assert_eq!(
        text,
        concat!(
            r#"{"id":1,"price_id":10,"currency":"USD"}"#,
            "\n",
            r#"{"id":1,"price_id":11,"currency":"EUR"}"#,
            "\n",
            r#"{"id":2,"price_id":null,"currency":null}"#,
            "\n"
        )
    );
}

#[tokio::test]
async fn test_stream_fails_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/activities"))
        .respond_with(ResponseTemplate::new(504))
        .expect(4)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = runner("pipedrive-activity")
        .run(&connection_vars(&server), &json!([]), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 504, .. }));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_http_settings_tune_retries() {
    for (settings, attempts) in [
        (json!({"max_retries": 0}), 1),
        (json!({"max_retries": 1, "backoff": "constant"}), 2),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/deals"))
            .respond_with(ResponseTemplate::new(502))
            .expect(attempts)
            .mount(&server)
            .await;

        let vars = InvocationVars::from_json(json!({
            "pipedrive_connection": {"access_token": "tok", "api_base_uri": server.uri()},
            "http": settings
        }))
        .unwrap();

        let mut out = Vec::new();
        let err = runner("pipedrive-deals")
            .run(&vars, &json!([]), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
    }
}

// ============================================================================
// Table Tests
// ============================================================================

#[tokio::test]
async fn test_table_renders_cells_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/organizations"))
        .and(query_param_is_missing("start"))
        .respond_with(page(
            json!([{"id": 1, "name": "Acme", "people_count": 12}]),
            true,
            Some(1),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/organizations"))
        .and(query_param("start", "1"))
        .respond_with(page(json!([{"id": 2, "name": "Beta", "people_count": 0}]), false, None))
        .mount(&server)
        .await;

    let (stats, text) = run_to_string(
        &runner("pipedrive-list-orgs"),
        &connection_vars(&server),
        json!(["people_cnt,name,id"]),
    )
    .await;

    assert_eq!(stats.rows_emitted, 2);
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        doc,
        json!([
            ["id", "name", "people_cnt"],
            ["1", "Acme", "12"],
            ["2", "Beta", "0"]
        ])
    );
}

#[tokio::test]
async fn test_table_empty_collection_is_header_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/organizations"))
        .respond_with(page(json!(null), false, None))
        .mount(&server)
        .await;

    let (_, text) = run_to_string(
        &runner("pipedrive-list-orgs"),
        &connection_vars(&server),
        json!(["id"]),
    )
    .await;
    assert_eq!(text, "[[\"id\"]]\n");
}

// ============================================================================
// Enrichment Tests
// ============================================================================

#[tokio::test]
async fn test_enrich_people_fetches_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/searchResults"))
        .and(query_param("item_type", "person"))
        .and(query_param("term", "Ann Lee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 77, "type": "person"}, {"id": 78, "type": "person"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/persons/77"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 77,
                "name": "Ann Lee",
                "email": [{"value": "ann@acme.com", "primary": true}],
                "open_deals_count": 3
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (stats, text) = run_to_string(
        &runner("pipedrive-enrich-people"),
        &connection_vars(&server),
        json!(["Ann Lee", "open_deals_cnt,email,name"]),
    )
    .await;

    assert_eq!(stats.outcome, RunOutcome::Completed);
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc, json!([["Ann Lee", "ann@acme.com", "3"]]));
}

#[tokio::test]
async fn test_enrich_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/searchResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .mount(&server)
        .await;

    let (stats, text) = run_to_string(
        &runner("pipedrive-enrich-org"),
        &connection_vars(&server),
        json!(["Nobody Inc"]),
    )
    .await;

    assert_eq!(stats.outcome, RunOutcome::NoMatch);
    assert_eq!(text, "[[\"No organizations match the search term\"]]\n");
}

#[tokio::test]
async fn test_enrich_requires_search_term() {
    let server = MockServer::start().await;
    let mut out = Vec::new();
    let err = runner("pipedrive-enrich-org")
        .run(&connection_vars(&server), &json!(["x"]), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParam { .. }));
}

#[test]
fn test_entity_url_encodes_id_as_one_segment() {
    let url = entity_url("https://acme.pipedrive.com/", "/v1/persons", "a/b?c#d e").unwrap();
    assert_eq!(url, "https://acme.pipedrive.com/v1/persons/a%2Fb%3Fc%23d%20e");

    let url = entity_url("https://acme.pipedrive.com", "/v1/organizations", "42").unwrap();
    assert_eq!(url, "https://acme.pipedrive.com/v1/organizations/42");
}

#[tokio::test]
async fn test_enrich_id_cannot_escape_entity_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/searchResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "a/b?c", "type": "person"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/persons/a%2Fb%3Fc"))
        .and(query_param_is_missing("c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 1, "name": "Ann Lee"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, text) = run_to_string(
        &runner("pipedrive-enrich-people"),
        &connection_vars(&server),
        json!(["Ann", "name"]),
    )
    .await;

    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc, json!([["Ann Lee"]]));
}

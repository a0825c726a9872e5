//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: invocation vars + positional input →
//! paginated HTTP requests → NDJSON/table output

use pipedrive_extract::cli::{Cli, Commands};
use pipedrive_extract::{lookup, AdapterRunner, Error, InvocationVars, RunOutcome, ADAPTERS};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn vars_for(server: &MockServer) -> InvocationVars {
    InvocationVars::from_json(json!({
        "pipedrive_connection": {
            "access_token": "test-token",
            "api_base_uri": format!("{}/", server.uri())
        }
    }))
    .unwrap()
}

fn envelope(data: Value, more: bool, next: Option<u64>) -> Value {
    json!({
        "success": true,
        "data": data,
        "additional_data": {
            "pagination": {"start": 0, "limit": 500, "more_items_in_collection": more, "next_start": next}
        }
    })
}

async fn run(name: &str, vars: &InvocationVars, input: Value) -> pipedrive_extract::Result<String> {
    let mut out = Vec::new();
    AdapterRunner::new(lookup(name)?)
        .run(vars, &input, &mut out)
        .await?;
    Ok(String::from_utf8(out).unwrap())
}

fn ndjson(text: &str) -> Vec<Value> {
    text.lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// Streaming Adapters
// ============================================================================

#[tokio::test]
async fn test_activity_stream_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/activities"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("limit", "500"))
        .and(query_param("user_id", "0"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!([
                {"id": 1, "subject": "Call", "done": false, "deal_id": 10, "org_name": "Acme"},
                {"id": 2, "subject": "Lunch", "done": true, "deal_id": null}
            ]),
            true,
            Some(2),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/activities"))
        .and(query_param("start", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!([{"id": 3, "subject": "Demo", "done": false}]),
            false,
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let text = run(
        "pipedrive-activity",
        &vars_for(&server),
        json!(["id,subject,done"]),
    )
    .await
    .unwrap();

    assert_eq!(
        ndjson(&text),
        vec![
            json!({"id": 1, "subject": "Call", "done": false}),
            json!({"id": 2, "subject": "Lunch", "done": true}),
            json!({"id": 3, "subject": "Demo", "done": false}),
        ]
    );
}

#[tokio::test]
async fn test_deals_filter_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .and(query_param("status", "won"))
        .and(query_param("stage_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!([{"id": 7, "title": "Big", "status": "won", "person_id": {"name": "Ann", "value": 3}}]),
            false,
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let text = run(
        "pipedrive-deals",
        &vars_for(&server),
        json!(["person_name,id", "?status=won&stage_id=4"]),
    )
    .await
    .unwrap();

    assert_eq!(ndjson(&text), vec![json!({"id": 7, "person_name": "Ann"})]);
}

#[tokio::test]
async fn test_people_retries_throttled_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/persons"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/persons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!([{
                "id": 5,
                "name": "Ann Lee",
                "email": [
                    {"value": "old@acme.com", "primary": false},
                    {"value": "ann@acme.com", "primary": true}
                ],
                "phone": []
            }]),
            false,
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let text = run(
        "pipedrive-people",
        &vars_for(&server),
        json!([["name", "email", "phone"]]),
    )
    .await
    .unwrap();

    assert_eq!(
        ndjson(&text),
        vec![json!({"name": "Ann Lee", "email": "ann@acme.com", "phone": ""})]
    );
}

#[tokio::test]
async fn test_deals_do_not_retry_throttling() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/deals"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = run("pipedrive-deals", &vars_for(&server), json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 429, .. }));
}

#[tokio::test]
async fn test_stream_requires_credentials() {
    let err = run("pipedrive-products", &InvocationVars::default(), json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

// ============================================================================
// Table and Enrichment Adapters
// ============================================================================

#[tokio::test]
async fn test_list_orgs_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/organizations"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!([
                {"id": 1, "name": "Acme", "open_deals_count": 2, "address": "1 Main St"},
                {"id": 2, "name": "Beta", "open_deals_count": 0, "address": null}
            ]),
            false,
            None,
        )))
        .mount(&server)
        .await;

    let text = run(
        "pipedrive-list-orgs",
        &vars_for(&server),
        json!(["address,name,open_deals_cnt"]),
    )
    .await
    .unwrap();

    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        doc,
        json!([
            ["name", "open_deals_cnt", "address"],
            ["Acme", "2", "1 Main St"],
            ["Beta", "0", ""]
        ])
    );
}

#[tokio::test]
async fn test_legacy_tables_soft_fail_without_credentials() {
    for name in ["pipedrive-list-deals", "pipedrive-list-people"] {
        let text = run(name, &InvocationVars::default(), json!(["*"]))
            .await
            .unwrap();
        assert_eq!(text, "[[\"\"]]\n", "{name}");
    }
}

#[tokio::test]
async fn test_enrich_org_uses_api_token_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/searchResults"))
        .and(query_param("api_token", "test-token"))
        .and(query_param("item_type", "organization"))
        .and(query_param("term", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": "42", "type": "organization", "title": "Acme"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/organizations/42"))
        .and(query_param("api_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 42, "name": "Acme", "people_count": 9, "address": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = run(
        "pipedrive-enrich-org",
        &vars_for(&server),
        json!(["Acme", "address,people_cnt,name"]),
    )
    .await
    .unwrap();

    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc, json!([["Acme", "9", ""]]));
}

#[tokio::test]
async fn test_enrich_people_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/searchResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let stats = AdapterRunner::new(lookup("pipedrive-enrich-people").unwrap())
        .run(&vars_for(&server), &json!(["Nobody"]), &mut out)
        .await
        .unwrap();

    assert_eq!(stats.outcome, RunOutcome::NoMatch);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "[[\"No people match the search term\"]]\n"
    );
}

// ============================================================================
// Catalog and CLI
// ============================================================================

#[test]
fn test_every_adapter_is_describable() {
    for adapter in ADAPTERS {
        let doc = adapter.describe();
        assert_eq!(doc["name"], adapter.name);
        assert!(!doc["returns"].as_array().unwrap().is_empty());
    }
}

#[test]
fn test_cli_parses_run_command() {
    use clap::Parser;

    let cli = Cli::try_parse_from([
        "pipedrive-extract",
        "run",
        "pipedrive-deals",
        "--input",
        r#"["id,title"]"#,
    ])
    .unwrap();

    match cli.command {
        Commands::Run { adapter, input, .. } => {
            assert_eq!(adapter, "pipedrive-deals");
            assert_eq!(input, r#"["id,title"]"#);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

//! Tests for parameter binding

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

const LIST_SCHEMA: &[ParamSpec] = &[ParamSpec::properties("*"), ParamSpec::filter()];
const ENRICH_SCHEMA: &[ParamSpec] = &[ParamSpec::search_term(), ParamSpec::properties("name")];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_empty_input_uses_defaults() {
    let params = bind(LIST_SCHEMA, &json!([])).unwrap();
    assert_eq!(params.properties(), strings(&["*"]).as_slice());
    assert!(params.filter().is_empty());
}

#[test]
fn test_blank_input_text_binds_as_empty_array() {
    let params = bind_str(LIST_SCHEMA, "  ").unwrap();
    assert_eq!(params.properties(), strings(&["*"]).as_slice());
}

#[test_case(json!("id,name") ; "comma string")]
#[test_case(json!(["id", "name"]) ; "array")]
#[test_case(json!([["id"], "name"]) ; "nested array")]
#[test_case(json!([" ID ", "Name", "id"]) ; "normalized")]
#[test_case(json!("id,,name, ") ; "blank entries")]
fn test_properties_shapes(value: serde_json::Value) {
    let params = bind(LIST_SCHEMA, &json!([value])).unwrap();
    assert_eq!(params.properties(), strings(&["id", "name"]).as_slice());
}

#[test]
fn test_properties_all_blank_falls_back_to_default() {
    let params = bind(ENRICH_SCHEMA, &json!(["acme", " , "])).unwrap();
    assert_eq!(params.properties(), strings(&["name"]).as_slice());
}

#[test]
fn test_null_counts_as_omitted() {
    let params = bind(LIST_SCHEMA, &json!([null, null])).unwrap();
    assert_eq!(params.properties(), strings(&["*"]).as_slice());
}

#[test_case(json!(42) ; "number")]
#[test_case(json!([1, 2]) ; "array of numbers")]
#[test_case(json!([["id", 3]]) ; "nested non string")]
#[test_case(json!({"id": true}) ; "object")]
fn test_properties_rejects_bad_shapes(value: serde_json::Value) {
    let err = bind(LIST_SCHEMA, &json!([value])).unwrap_err();
    assert!(matches!(err, Error::InvalidParam { ref param, .. } if param == "properties"));
}

#[test]
fn test_filter_parsed_in_order() {
    let params = bind(LIST_SCHEMA, &json!(["*", "status=open&owner_id=5"])).unwrap();
    assert_eq!(
        params.filter(),
        &[
            ("status".to_string(), "open".to_string()),
            ("owner_id".to_string(), "5".to_string())
        ]
    );
}

#[test]
fn test_filter_decodes_and_skips_empty_keys() {
    let params = bind(LIST_SCHEMA, &json!(["*", "?term=big%20deal&=x&stage_id=2"])).unwrap();
    assert_eq!(
        params.filter(),
        &[
            ("term".to_string(), "big deal".to_string()),
            ("stage_id".to_string(), "2".to_string())
        ]
    );
}

#[test]
fn test_filter_must_be_string() {
    let err = bind(LIST_SCHEMA, &json!(["*", {"status": "open"}])).unwrap_err();
    assert!(matches!(err, Error::InvalidParam { ref param, .. } if param == "filter"));
}

#[test]
fn test_search_term_required() {
    let err = bind(ENRICH_SCHEMA, &json!([])).unwrap_err();
    assert!(matches!(err, Error::MissingParam { ref param } if param == "search_term"));
}

#[test_case(json!(["a"]) ; "too short")]
#[test_case(json!([12]) ; "not a string")]
fn test_search_term_invalid(input: serde_json::Value) {
    let err = bind(ENRICH_SCHEMA, &input).unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn test_search_term_valid() {
    let params = bind(ENRICH_SCHEMA, &json!(["Acme", "*"])).unwrap();
    assert_eq!(params.search_term(), Some("Acme"));
    assert_eq!(params.properties(), strings(&["*"]).as_slice());
}

#[test]
fn test_extra_arguments_ignored() {
    let params = bind(ENRICH_SCHEMA, &json!(["Acme", "name", "extra", 3])).unwrap();
    assert_eq!(params.search_term(), Some("Acme"));
}

#[test_case(json!({"properties": "*"}) ; "object")]
#[test_case(json!("id") ; "string")]
fn test_non_array_input_rejected(input: serde_json::Value) {
    let err = bind(LIST_SCHEMA, &input).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn test_bind_str_rejects_malformed_json() {
    let err = bind_str(LIST_SCHEMA, "[\"id\"").unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn test_normalize_names() {
    let names = normalize_names(strings(&["  Name", "", "NAME", "id "]));
    assert_eq!(names, strings(&["name", "id"]));
}

#[test]
fn test_params_accessors_on_wrong_kind() {
    let params = bind(ENRICH_SCHEMA, &json!(["Acme"])).unwrap();
    assert!(params.list("search_term").is_empty());
    assert!(params.text("properties").is_none());
    assert!(params.pairs("filter").is_empty());
}

#[test_case("?limit=1" ; "page size")]
#[test_case("status=won&start=500" ; "cursor")]
#[test_case("api_token=other" ; "token")]
#[test_case("user_id=7" ; "fixed param")]
fn test_reserved_filter_keys_rejected(query: &str) {
    let params = bind(LIST_SCHEMA, &json!(["*", query])).unwrap();
    let err = reject_reserved(
        "filter",
        params.filter(),
        &["limit", "start", "api_token", "user_id"],
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidParam { ref param, .. } if param == "filter"));
}

#[test]
fn test_unreserved_filter_keys_pass() {
    let params = bind(LIST_SCHEMA, &json!(["*", "status=won&stage_id=4"])).unwrap();
    assert!(reject_reserved("filter", params.filter(), &["limit", "start"]).is_ok());
}

//! Tests for output module

use super::*;
use crate::mapping::{map_record, FieldMap, FieldSpec, OutputRecord};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

const DEAL: FieldMap = FieldMap::new(&[
    FieldSpec::scalar("id"),
    FieldSpec::scalar("title"),
    FieldSpec::scalar("value"),
    FieldSpec::scalar("active"),
    FieldSpec::scalar("lost_reason"),
]);

fn deal(raw: Value) -> OutputRecord {
    map_record(&DEAL, &raw)
}

// ============================================================================
// Cell Rendering Tests
// ============================================================================

#[test_case(Value::Null, json!("") ; "null")]
#[test_case(json!(42), json!("42") ; "integer")]
#[test_case(json!(0), json!("0") ; "zero")]
#[test_case(json!(-3), json!("-3") ; "negative")]
#[test_case(json!(1250.5), json!("1250.5") ; "decimal")]
#[test_case(json!(true), json!(true) ; "true")]
#[test_case(json!(false), json!(false) ; "false")]
#[test_case(json!("2024-03-01"), json!("2024-03-01") ; "date string")]
#[test_case(json!(""), json!("") ; "empty string")]
fn test_render_cell(value: Value, expected: Value) {
    assert_eq!(render_cell(&value), expected);
}

// ============================================================================
// NDJSON Tests
// ============================================================================

#[test]
fn test_ndjson_record_per_line() {
    let mut writer = NdjsonWriter::new(Vec::new());
    writer
        .write_record(&deal(json!({"id": 1, "title": "A", "value": 10})))
        .unwrap();
    writer.write_record(&deal(json!({"id": 2}))).unwrap();
    assert_eq!(writer.lines(), 2);

    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"id":1,"title":"A","value":10,"active":null,"lost_reason":null}"#,
            "\n",
            r#"{"id":2,"title":null,"value":null,"active":null,"lost_reason":null}"#,
            "\n"
        )
    );
}

#[test]
fn test_ndjson_page() {
    let records = vec![deal(json!({"id": 1})), deal(json!({"id": 2})), deal(json!({"id": 3}))];
    let mut writer = NdjsonWriter::new(Vec::new());
    writer.write_page(&records).unwrap();
    writer.write_page(&[]).unwrap();

    assert_eq!(writer.lines(), 3);
    let text = String::from_utf8(writer.into_inner()).unwrap();
    let ids: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).unwrap()["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
}

// ============================================================================
// Table Tests
// ============================================================================

#[test]
fn test_table_document() {
    let mut table = Table::new(vec!["id", "title", "value", "active", "lost_reason"]);
    table.push(&deal(json!({"id": 7, "title": "Big", "value": 99.5, "active": false})));
    assert_eq!(table.len(), 1);
    assert!(!table.is_empty());

    assert_eq!(
        table.to_json(),
        json!([
            ["id", "title", "value", "active", "lost_reason"],
            ["7", "Big", "99.5", false, ""]
        ])
    );
}

#[test]
fn test_empty_table_is_header_only() {
    let table = Table::new(vec!["id", "name"]);
    assert!(table.is_empty());
    assert_eq!(table.header(), &["id", "name"]);
    assert_eq!(table.to_json(), json!([["id", "name"]]));
}

#[test]
fn test_row_payload_has_no_header() {
    let record = deal(json!({"id": 5, "title": "Acme"}));
    assert_eq!(row_payload(&record), json!([["5", "Acme", "", "", ""]]));
}

#[test]
fn test_message_and_empty_payloads() {
    assert_eq!(
        message_payload("No people match the search term"),
        json!([["No people match the search term"]])
    );
    assert_eq!(empty_payload(), json!([[""]]));
}

#[test]
fn test_write_json() {
    let mut out = Vec::new();
    write_json(&mut out, &json!([["a"], ["1"]])).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[[\"a\"],[\"1\"]]\n");
}

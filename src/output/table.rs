//! Array-of-arrays table output
//!
//! Table and single-row outputs render each cell to a display value:
//! null becomes `""`, numbers become their string form, booleans and
//! strings pass through.

use crate::error::{Error, Result};
use crate::mapping::OutputRecord;
use crate::types::JsonValue;
use std::io::Write;

/// Render one mapped value as a table cell
pub fn render_cell(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Null => JsonValue::String(String::new()),
        JsonValue::Number(n) => JsonValue::String(n.to_string()),
        other => other.clone(),
    }
}

/// Render a record's values as a table row
pub fn render_row(record: &OutputRecord) -> Vec<JsonValue> {
    record.values().map(render_cell).collect()
}

/// Header row followed by one row per record
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Vec<&'static str>,
    rows: Vec<Vec<JsonValue>>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(header: Vec<&'static str>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Append a record as a rendered row
    pub fn push(&mut self, record: &OutputRecord) {
        self.rows.push(render_row(record));
    }

    /// Header names
    pub fn header(&self) -> &[&'static str] {
        &self.header
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// JSON document `[[header...], [row...], ...]`
    pub fn to_json(&self) -> JsonValue {
        let header = JsonValue::Array(
            self.header
                .iter()
                .map(|h| JsonValue::String((*h).to_string()))
                .collect(),
        );
        let mut doc = Vec::with_capacity(self.rows.len() + 1);
        doc.push(header);
        doc.extend(self.rows.iter().cloned().map(JsonValue::Array));
        JsonValue::Array(doc)
    }
}

/// Single value row without a header: `[[values...]]`
pub fn row_payload(record: &OutputRecord) -> JsonValue {
    JsonValue::Array(vec![JsonValue::Array(render_row(record))])
}

/// One-cell informational payload: `[["message"]]`
pub fn message_payload(message: &str) -> JsonValue {
    JsonValue::Array(vec![JsonValue::Array(vec![JsonValue::String(
        message.to_string(),
    )])])
}

/// Payload emitted when credentials are missing: `[[""]]`
pub fn empty_payload() -> JsonValue {
    message_payload("")
}

/// Write a JSON document followed by a newline
pub fn write_json<W: Write>(mut writer: W, doc: &JsonValue) -> Result<()> {
    serde_json::to_writer(&mut writer, doc)
        .map_err(|e| Error::output(format!("Failed to serialize output: {e}")))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

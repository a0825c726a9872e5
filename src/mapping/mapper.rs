//! Record mapper
//!
//! Applies a field map to raw upstream records. Extraction never coerces
//! values; rendering for table output happens in the output module.

use super::projection::Projection;
use super::types::{Extract, FieldMap, FieldSpec, OutputRecord};
use crate::types::JsonValue;

/// Maps raw records to output records for one field map and projection
#[derive(Debug, Clone)]
pub struct RecordMapper {
    fields: Vec<&'static FieldSpec>,
}

impl RecordMapper {
    /// Mapper emitting every field of the map
    pub fn new(map: FieldMap) -> Self {
        Self {
            fields: map.fields().iter().collect(),
        }
    }

    /// Mapper emitting only the projected fields
    pub fn with_projection(map: FieldMap, projection: &Projection) -> Self {
        Self {
            fields: map
                .fields()
                .iter()
                .filter(|f| projection.contains(f.name))
                .collect(),
        }
    }

    /// Output names this mapper emits, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Map one raw record
    pub fn map(&self, raw: &JsonValue) -> OutputRecord {
        self.map_with_price(raw, None)
    }

    /// Map one raw record together with an associated price sub-record
    pub fn map_with_price(&self, raw: &JsonValue, price: Option<&JsonValue>) -> OutputRecord {
        let mut record = OutputRecord::with_capacity(self.fields.len());
        for field in &self.fields {
            record.push(field.name, extract(&field.extract, raw, price));
        }
        record
    }

    /// Map one raw record into one output record per entry of `detail_list`.
    ///
    /// A record whose list is missing or empty still yields exactly one
    /// output record, with every price field null.
    pub fn fan_out(&self, raw: &JsonValue, detail_list: &str) -> Vec<OutputRecord> {
        match raw.get(detail_list).and_then(JsonValue::as_array) {
            Some(details) if !details.is_empty() => details
                .iter()
                .map(|detail| self.map_with_price(raw, Some(detail)))
                .collect(),
            _ => vec![self.map_with_price(raw, None)],
        }
    }
}

/// Map a raw record with every field of `map`
pub fn map_record(map: &FieldMap, raw: &JsonValue) -> OutputRecord {
    RecordMapper::new(*map).map(raw)
}

/// Pull a single value out of a raw record
pub fn extract(rule: &Extract, raw: &JsonValue, price: Option<&JsonValue>) -> JsonValue {
    match *rule {
        Extract::Scalar(key) => raw.get(key).cloned().unwrap_or(JsonValue::Null),
        Extract::Relation { object, field } => raw
            .get(object)
            .filter(|related| related.is_object())
            .and_then(|related| related.get(field))
            .cloned()
            .unwrap_or(JsonValue::Null),
        Extract::PrimaryOf { list, attr } => primary_entry(raw, list)
            .and_then(|entry| entry.get(attr.key()))
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| JsonValue::String(String::new())),
        Extract::Price(key) => price
            .and_then(|p| p.get(key))
            .cloned()
            .unwrap_or(JsonValue::Null),
    }
}

/// First entry of a list flagged `primary: true`
fn primary_entry<'a>(raw: &'a JsonValue, list: &str) -> Option<&'a JsonValue> {
    raw.get(list)?
        .as_array()?
        .iter()
        .find(|entry| entry.get("primary").and_then(JsonValue::as_bool) == Some(true))
}

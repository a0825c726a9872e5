//! Mapping types
//!
//! Field maps are static, ordered tables of output name to extraction rule.
//! An `OutputRecord` is what a field map produces for one raw record.

use crate::types::JsonValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Which attribute of a `{value, label, primary}` entry to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAttr {
    /// The entry's `value`
    Value,
    /// The entry's `label`
    Label,
}

impl PrimaryAttr {
    /// Key of the attribute inside a list entry
    pub fn key(self) -> &'static str {
        match self {
            PrimaryAttr::Value => "value",
            PrimaryAttr::Label => "label",
        }
    }
}

/// How a single output field is pulled out of a raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Direct key on the record
    Scalar(&'static str),
    /// Key on a nested related object (`org_id.name`)
    Relation {
        /// Key of the related object on the record
        object: &'static str,
        /// Key inside the related object
        field: &'static str,
    },
    /// Attribute of the first entry flagged `primary` in a list
    PrimaryOf {
        /// Key of the list on the record
        list: &'static str,
        /// Attribute read from the primary entry
        attr: PrimaryAttr,
    },
    /// Key on the associated price sub-record
    Price(&'static str),
}

/// One output column and how to fill it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Stable output name
    pub name: &'static str,
    /// Extraction rule
    pub extract: Extract,
}

impl FieldSpec {
    /// Output name equal to the source key
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            extract: Extract::Scalar(name),
        }
    }

    /// Output name read from a differently named source key
    pub const fn renamed(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            extract: Extract::Scalar(source),
        }
    }

    /// Output name read from a related object
    pub const fn relation(name: &'static str, object: &'static str, field: &'static str) -> Self {
        Self {
            name,
            extract: Extract::Relation { object, field },
        }
    }

    /// Output name read from the primary entry of a list
    pub const fn primary(name: &'static str, list: &'static str, attr: PrimaryAttr) -> Self {
        Self {
            name,
            extract: Extract::PrimaryOf { list, attr },
        }
    }

    /// Output name read from the price sub-record
    pub const fn price(name: &'static str, field: &'static str) -> Self {
        Self {
            name,
            extract: Extract::Price(field),
        }
    }
}

/// Static ordered list of output fields for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    fields: &'static [FieldSpec],
}

impl FieldMap {
    /// Wrap a static field table
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// All field specs in output order
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Output names in order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }

    /// Look up a field by output name
    pub fn get(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether an output name exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the map has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether any field reads from a price sub-record
    pub fn has_price_fields(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(f.extract, Extract::Price(_)))
    }
}

/// Ordered mapping of output name to value
///
/// Serializes as a JSON object with keys in field-map order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRecord {
    fields: Vec<(&'static str, JsonValue)>,
}

impl OutputRecord {
    /// Create an empty record with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field
    pub fn push(&mut self, name: &'static str, value: JsonValue) {
        self.fields.push((name, value));
    }

    /// Value of a field by output name
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Output names in order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }

    /// Values in order
    pub fn values(&self) -> impl Iterator<Item = &JsonValue> {
        self.fields.iter().map(|(_, v)| v)
    }

    /// Consume the record, keeping only the values
    pub fn into_values(self) -> Vec<JsonValue> {
        self.fields.into_iter().map(|(_, v)| v).collect()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

//! Parameter schema types

use serde::Serialize;

/// Shape a positional parameter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// A single string
    Text,
    /// Comma-separated string or array of strings, normalized to lowercase names
    List,
    /// URL query string parsed into key/value pairs
    Query,
}

/// Declared parameter of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Parameter name
    pub name: &'static str,
    /// Accepted shape
    pub kind: ParamKind,
    /// Whether the caller must supply it
    pub required: bool,
    /// Value used when the caller omits it
    pub default: Option<&'static str>,
    /// Minimum length for text values
    #[serde(skip_serializing_if = "is_zero")]
    pub min_len: usize,
    /// Human readable description
    pub description: &'static str,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl ParamSpec {
    /// Optional property list defaulting to `default`
    pub const fn properties(default: &'static str) -> Self {
        Self {
            name: "properties",
            kind: ParamKind::List,
            required: false,
            default: Some(default),
            min_len: 0,
            description: "The properties to return, as a comma-separated string or a list",
        }
    }

    /// Optional upstream filter
    pub const fn filter() -> Self {
        Self {
            name: "filter",
            kind: ParamKind::Query,
            required: false,
            default: None,
            min_len: 0,
            description: "Key/value filter given as a URL query string",
        }
    }

    /// Required search term of at least two characters
    pub const fn search_term() -> Self {
        Self {
            name: "search_term",
            kind: ParamKind::Text,
            required: true,
            default: None,
            min_len: 2,
            description: "The term to search for",
        }
    }
}

/// Validated value of one parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Text value
    Text(String),
    /// Normalized list of names
    List(Vec<String>),
    /// Ordered key/value pairs
    Pairs(Vec<(String, String)>),
}

/// Immutable set of validated parameters, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<(&'static str, ParamValue)>,
}

impl Params {
    pub(crate) fn from_values(values: Vec<(&'static str, ParamValue)>) -> Self {
        Self { values }
    }

    /// Raw value of a parameter
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Text value of a parameter
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ParamValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// List value of a parameter, empty when unset
    pub fn list(&self, name: &str) -> &[String] {
        match self.get(name) {
            Some(ParamValue::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Key/value pairs of a parameter, empty when unset
    pub fn pairs(&self, name: &str) -> &[(String, String)] {
        match self.get(name) {
            Some(ParamValue::Pairs(pairs)) => pairs.as_slice(),
            _ => &[],
        }
    }

    /// Requested properties
    pub fn properties(&self) -> &[String] {
        self.list("properties")
    }

    /// Filter pairs
    pub fn filter(&self) -> &[(String, String)] {
        self.pairs("filter")
    }

    /// Search term
    pub fn search_term(&self) -> Option<&str> {
        self.text("search_term")
    }
}

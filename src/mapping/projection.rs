//! Property projection
//!
//! Restricts the columns a mapper emits to a caller-chosen subset while
//! keeping field-map order.

use super::types::FieldMap;
use crate::error::{Error, Result};

/// Wildcard selecting every field
pub const WILDCARD: &str = "*";

/// Validated subset of a field map's output names, in field-map order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    names: Vec<&'static str>,
}

impl Projection {
    /// Select every field of the map
    pub fn all(map: &FieldMap) -> Self {
        Self {
            names: map.names().collect(),
        }
    }

    /// Select the requested names.
    ///
    /// An empty request or one containing `*` selects everything. Any name
    /// missing from the map is rejected with the list of valid names.
    pub fn select<S: AsRef<str>>(map: &FieldMap, requested: &[S]) -> Result<Self> {
        if requested.is_empty() || requested.iter().any(|r| r.as_ref() == WILDCARD) {
            return Ok(Self::all(map));
        }

        if let Some(unknown) = requested.iter().find(|r| !map.contains(r.as_ref())) {
            return Err(Error::UnknownProperty {
                property: unknown.as_ref().to_string(),
                available: map.names().collect::<Vec<_>>().join(", "),
            });
        }

        let names = map
            .names()
            .filter(|name| requested.iter().any(|r| r.as_ref() == *name))
            .collect();

        Ok(Self { names })
    }

    /// Selected names in output order
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Check whether a name is selected
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }

    /// Number of selected names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

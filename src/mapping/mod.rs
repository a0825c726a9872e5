//! Record mapping module
//!
//! Turns raw Pipedrive records into ordered output records.
//!
//! # Overview
//!
//! - `FieldMap` / `FieldSpec` - static per-entity tables of output name to extraction
//! - `RecordMapper` - applies a field map, optionally restricted by a `Projection`
//! - `OutputRecord` - ordered result, serialized with keys in field-map order

mod mapper;
mod projection;
mod types;

pub use mapper::{extract, map_record, RecordMapper};
pub use projection::{Projection, WILDCARD};
pub use types::{Extract, FieldMap, FieldSpec, OutputRecord, PrimaryAttr};

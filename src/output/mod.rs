//! Output module
//!
//! Serializes mapped records for the caller.
//!
//! # Overview
//!
//! This module provides:
//! - `NdjsonWriter` - one JSON object per line, flushed page by page
//! - `Table` - `[[header...], [row...]]` documents with rendered cells
//! - Single-row, message and empty payloads for enrichment adapters

mod ndjson;
mod table;

pub use ndjson::NdjsonWriter;
pub use table::{
    empty_payload, message_payload, render_cell, render_row, row_payload, write_json, Table,
};

#[cfg(test)]
mod tests;

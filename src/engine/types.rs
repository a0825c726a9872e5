//! Engine types
//!
//! Run outcome and statistics for one adapter invocation.

use crate::types::JsonValue;
use serde::Deserialize;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunOutcome {
    /// Records were fetched and emitted
    #[default]
    Completed,
    /// Enrichment search found nothing; the no-match payload was emitted
    NoMatch,
    /// Credentials were missing; the empty payload was emitted
    MissingCredentials,
}

/// Statistics from one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// How the run ended
    pub outcome: RunOutcome,
    /// HTTP pages or entities fetched
    pub pages_fetched: usize,
    /// Raw records read
    pub records_read: usize,
    /// Output rows or lines emitted
    pub rows_emitted: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_read += records;
    }

    /// Record emitted rows
    pub fn add_rows(&mut self, rows: usize) {
        self.rows_emitted += rows;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Envelope of a single-entity response: `{ "data": {...} }`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EntityEnvelope {
    #[serde(default)]
    pub data: Option<JsonValue>,
}

//! Pagination types
//!
//! The Pipedrive collection envelope and the decision of whether another
//! page should be requested.

use crate::types::JsonValue;
use serde::Deserialize;

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Query key carrying the page size
pub const LIMIT_PARAM: &str = "limit";

/// Query key carrying the offset cursor
pub const START_PARAM: &str = "start";

/// Response envelope shared by all Pipedrive collection endpoints
///
/// ```text
/// { "data": [...], "additional_data": { "pagination": { ... } } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageEnvelope {
    /// Records on this page; `null` is read as empty
    #[serde(default)]
    pub data: Option<Vec<JsonValue>>,
    /// Metadata block
    #[serde(default)]
    pub additional_data: Option<AdditionalData>,
}

impl PageEnvelope {
    /// Split the envelope into its records and pagination metadata
    pub fn into_parts(self) -> (Vec<JsonValue>, Option<PaginationInfo>) {
        let pagination = self.additional_data.and_then(|a| a.pagination);
        (self.data.unwrap_or_default(), pagination)
    }
}

/// `additional_data` block of the envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdditionalData {
    /// Pagination metadata, absent on non-collection responses
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
}

/// `additional_data.pagination` block of the envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PaginationInfo {
    /// Offset this page started at
    #[serde(default)]
    pub start: Option<u64>,
    /// Page size the server applied
    #[serde(default)]
    pub limit: Option<u64>,
    /// Whether the server has more records after this page
    #[serde(default)]
    pub more_items_in_collection: Option<bool>,
    /// Cursor for the next page
    #[serde(default)]
    pub next_start: Option<u64>,
}

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page carried no records
    EmptyPage,
    /// `more_items_in_collection` was false or missing
    NoMoreItems,
    /// `next_start` was missing or null
    MissingCursor,
    /// `next_start` did not move past the current cursor
    StalledCursor,
}

/// Result of inspecting one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request another page starting at this offset
    Continue {
        /// Value for the `start` query parameter
        start: u64,
    },
    /// No more pages
    Done(StopReason),
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Decide whether to fetch another page.
///
/// Checked in order, first match wins: empty page, no more items,
/// missing cursor, otherwise continue at `next_start`.
pub fn next_page(
    records_count: usize,
    pagination: Option<&PaginationInfo>,
    current_start: Option<u64>,
) -> NextPage {
    if records_count == 0 {
        return NextPage::Done(StopReason::EmptyPage);
    }

    let Some(info) = pagination else {
        return NextPage::Done(StopReason::NoMoreItems);
    };

    if info.more_items_in_collection != Some(true) {
        return NextPage::Done(StopReason::NoMoreItems);
    }

    let Some(next_start) = info.next_start else {
        return NextPage::Done(StopReason::MissingCursor);
    };

    // The first page sits at offset 0
    if next_start <= current_start.unwrap_or(0) {
        return NextPage::Done(StopReason::StalledCursor);
    }

    NextPage::Continue { start: next_start }
}

/// Tracks pagination progress during one fetch
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Cursor for the next request (`None` on the first page)
    pub cursor: Option<u64>,
    /// Pages yielded so far
    pub pages: u32,
    /// Records yielded so far
    pub total_fetched: u64,
    /// Set once the sequence is exhausted or has failed
    pub done: bool,
    /// Why the sequence ended, if it ended cleanly
    pub stop_reason: Option<StopReason>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a yielded page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Mark pagination as complete
    pub fn finish(&mut self, reason: StopReason) {
        self.done = true;
        self.stop_reason = Some(reason);
    }

    /// Mark pagination as aborted
    pub fn abort(&mut self) {
        self.done = true;
    }
}

//! Pagination module
//!
//! Offset-cursor pagination as Pipedrive implements it: every collection
//! response carries `additional_data.pagination` with
//! `more_items_in_collection` and `next_start`, and the client echoes
//! `next_start` back as `start`.
//!
//! # Overview
//!
//! - `next_page` applies the stop rules to one page
//! - `PageFetcher` drives the request loop and yields pages lazily

mod fetcher;
mod types;

pub use fetcher::{Page, PageFetcher};
pub use types::{
    next_page, AdditionalData, NextPage, PageEnvelope, PaginationInfo, PaginationState,
    StopReason, DEFAULT_PAGE_SIZE, LIMIT_PARAM, START_PARAM,
};

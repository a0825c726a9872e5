//! Paginated fetcher
//!
//! Walks a Pipedrive collection endpoint one page at a time, following
//! `additional_data.pagination.next_start` until the collection is exhausted.
//! Each page request goes through the client's retry policy; any error ends
//! the sequence for good.

use super::types::{
    next_page, NextPage, PageEnvelope, PaginationState, DEFAULT_PAGE_SIZE, LIMIT_PARAM, START_PARAM,
};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::JsonValue;
use futures::stream::{self, Stream};
use tracing::debug;

/// One page of raw records
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number within this fetch
    pub number: u32,
    /// `start` offset the page was requested with
    pub start: Option<u64>,
    /// Raw records in upstream order
    pub records: Vec<JsonValue>,
}

/// Lazy, finite, non-restartable sequence of pages from one endpoint
#[derive(Debug)]
pub struct PageFetcher<'a> {
    client: &'a HttpClient,
    url: String,
    page_size: u32,
    params: Vec<(String, String)>,
    state: PaginationState,
}

impl<'a> PageFetcher<'a> {
    /// Create a fetcher for a collection URL (absolute, or relative to the client's base)
    pub fn new(client: &'a HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            params: Vec::new(),
            state: PaginationState::new(),
        }
    }

    /// Set the page size sent as `limit`
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Add a query parameter sent with every page
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters sent with every page
    #[must_use]
    pub fn params<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Pagination progress so far
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Fetch the next page, or `None` once the collection is exhausted
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.state.done {
            return Ok(None);
        }

        let start = self.state.cursor;
        let mut request = RequestConfig::new().query(LIMIT_PARAM, self.page_size.to_string());
        if let Some(start) = start {
            request = request.query(START_PARAM, start.to_string());
        }
        request = request.queries(self.params.iter().cloned());

        let envelope: PageEnvelope = match self.client.get_json(&self.url, &request).await {
            Ok(envelope) => envelope,
            Err(e) => {
                self.state.abort();
                return Err(e);
            }
        };

        let (records, pagination) = envelope.into_parts();
        let decision = next_page(records.len(), pagination.as_ref(), start);

        if let NextPage::Done(reason) = decision {
            if records.is_empty() {
                debug!(url = %self.url, ?reason, "Pagination finished on empty page");
                self.state.finish(reason);
                return Ok(None);
            }
            self.state.finish(reason);
        }

        self.state.add_page(records.len());
        let number = self.state.pages;

        if let NextPage::Continue { start: next } = decision {
            self.state.cursor = Some(next);
        }

        debug!(
            url = %self.url,
            page = number,
            records = records.len(),
            next = ?self.state.cursor.filter(|_| !self.state.done),
            "Fetched page"
        );

        Ok(Some(Page {
            number,
            start,
            records,
        }))
    }

    /// Turn the fetcher into a stream of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + 'a {
        stream::try_unfold(self, |mut fetcher| async move {
            let page = fetcher.next_page().await?;
            Ok(page.map(|page| (page, fetcher)))
        })
    }
}

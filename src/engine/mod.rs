//! Execution engine module
//!
//! Runs one adapter invocation end to end: resolve the connection, bind
//! parameters, fetch, map, and write the output.
//!
//! # Overview
//!
//! The engine module provides:
//! - `AdapterRunner` - executes any `AdapterDef` against a writer
//! - `RunStats` / `RunOutcome` - what a run did

mod types;

pub use types::{RunOutcome, RunStats};

use crate::adapters::{AdapterDef, EnrichSpec, Operation};
use crate::auth::{AuthConfig, API_TOKEN_PARAM};
use crate::config::{ConnectionContext, InvocationVars};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RequestConfig, RetryPolicy};
use crate::mapping::{Projection, RecordMapper};
use crate::output::{empty_payload, message_payload, row_payload, write_json, NdjsonWriter, Table};
use crate::pagination::{
    PageEnvelope, PageFetcher, DEFAULT_PAGE_SIZE, LIMIT_PARAM, START_PARAM,
};
use crate::params::{self, Params};
use crate::types::JsonValue;
use futures::StreamExt;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;
use types::EntityEnvelope;

/// Executes an adapter definition
#[derive(Debug, Clone)]
pub struct AdapterRunner {
    adapter: &'static AdapterDef,
    page_size: u32,
    retry: Option<RetryPolicy>,
}

impl AdapterRunner {
    /// Create a runner for an adapter
    pub fn new(adapter: &'static AdapterDef) -> Self {
        Self {
            adapter,
            page_size: DEFAULT_PAGE_SIZE,
            retry: None,
        }
    }

    /// Override the page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Override the adapter's retry policy
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// The adapter this runner executes
    pub fn adapter(&self) -> &'static AdapterDef {
        self.adapter
    }

    /// Run once, writing the adapter's output to `out`
    pub async fn run<W: Write>(
        &self,
        vars: &InvocationVars,
        input: &JsonValue,
        out: &mut W,
    ) -> Result<RunStats> {
        let start = Instant::now();
        let adapter = self.adapter;
        info!(adapter = adapter.name, "Starting run");

        let context = match vars.connection(adapter.credentials) {
            Ok(context) => context,
            Err(Error::MissingConfigField { field }) if adapter.soft_fails_on_missing_credentials() => {
                info!(adapter = adapter.name, %field, "Credentials missing, emitting empty payload");
                write_json(&mut *out, &empty_payload())?;
                return Ok(RunStats {
                    outcome: RunOutcome::MissingCredentials,
                    rows_emitted: 1,
                    ..RunStats::default()
                });
            }
            Err(e) => return Err(e),
        };

        let params = params::bind(adapter.params, input)?;
        self.check_filter(&params)?;
        let projection = Projection::select(&adapter.fields, params.properties())?;
        let mapper = RecordMapper::with_projection(adapter.fields, &projection);
        let client = self.client(vars, &context)?;

        let mut stats = match adapter.operation {
            Operation::Stream => self.stream(&client, &params, &mapper, out).await?,
            Operation::Table => self.table(&client, &mapper, out).await?,
            Operation::Enrich(spec) => {
                self.enrich(&client, &context, spec, &params, &mapper, out)
                    .await?
            }
        };

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            adapter = adapter.name,
            outcome = ?stats.outcome,
            pages = stats.pages_fetched,
            records = stats.records_read,
            rows = stats.rows_emitted,
            duration_ms = stats.duration_ms,
            "Run finished"
        );
        Ok(stats)
    }

    fn client(&self, vars: &InvocationVars, context: &ConnectionContext) -> Result<HttpClient> {
        let mut policy = self
            .retry
            .clone()
            .unwrap_or_else(|| self.adapter.retry.policy());
        match vars.http.max_retries {
            Some(0) => policy = RetryPolicy::none(),
            Some(retries) => policy = policy.max_retries(retries),
            None => {}
        }
        if let Some(backoff) = vars.http.backoff {
            policy = policy.backoff_type(backoff);
        }

        let mut builder = HttpClientConfig::builder()
            .base_url(&context.api_base_uri)
            .retry(policy);
        if let Some(seconds) = vars.http.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        if let Some(rps) = vars.http.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }

        let auth = AuthConfig::for_scheme(self.adapter.auth, context.access_token.clone());
        HttpClient::with_auth(builder.build(), auth)
    }

    /// Reject filter keys that would override the adapter's own query
    fn check_filter(&self, params: &Params) -> Result<()> {
        let mut reserved = vec![LIMIT_PARAM, START_PARAM, API_TOKEN_PARAM];
        reserved.extend(self.adapter.fixed_params.iter().map(|(key, _)| *key));
        params::reject_reserved("filter", params.filter(), &reserved)
    }

    fn fetcher<'a>(&self, client: &'a HttpClient, filter: &[(String, String)]) -> PageFetcher<'a> {
        PageFetcher::new(client, self.adapter.endpoint)
            .page_size(self.page_size)
            .params(self.adapter.fixed_params.iter().copied())
            .params(filter.iter().cloned())
    }

    async fn stream<W: Write>(
        &self,
        client: &HttpClient,
        params: &Params,
        mapper: &RecordMapper,
        out: &mut W,
    ) -> Result<RunStats> {
        let mut stats = RunStats::new();
        let mut writer = NdjsonWriter::new(&mut *out);
        let mut pages = Box::pin(self.fetcher(client, params.filter()).into_stream());

        while let Some(page) = pages.next().await {
            let page = page?;
            stats.add_page(page.records.len());

            let rows: Vec<_> = match self.adapter.fan_out {
                Some(list) => page
                    .records
                    .iter()
                    .flat_map(|raw| mapper.fan_out(raw, list))
                    .collect(),
                None => page.records.iter().map(|raw| mapper.map(raw)).collect(),
            };
            writer.write_page(&rows)?;
            stats.add_rows(rows.len());
        }

        writer.flush()?;
        Ok(stats)
    }

    async fn table<W: Write>(
        &self,
        client: &HttpClient,
        mapper: &RecordMapper,
        out: &mut W,
    ) -> Result<RunStats> {
        let mut stats = RunStats::new();
        let mut table = Table::new(mapper.names());
        let mut pages = Box::pin(self.fetcher(client, &[]).into_stream());

        while let Some(page) = pages.next().await {
            let page = page?;
            stats.add_page(page.records.len());
            for raw in &page.records {
                table.push(&mapper.map(raw));
            }
        }

        stats.add_rows(table.len());
        write_json(&mut *out, &table.to_json())?;
        Ok(stats)
    }

    async fn enrich<W: Write>(
        &self,
        client: &HttpClient,
        context: &ConnectionContext,
        spec: EnrichSpec,
        params: &Params,
        mapper: &RecordMapper,
        out: &mut W,
    ) -> Result<RunStats> {
        let mut stats = RunStats::new();
        let term = params
            .search_term()
            .ok_or_else(|| Error::MissingParam {
                param: "search_term".to_string(),
            })?;

        let request = RequestConfig::new()
            .query("item_type", spec.item_type)
            .query("term", term);
        let search: PageEnvelope = client.get_json(self.adapter.endpoint, &request).await?;
        let (matches, _) = search.into_parts();
        stats.add_page(matches.len());

        let Some(first) = matches.first() else {
            debug!(adapter = self.adapter.name, term, "Search returned no matches");
            write_json(&mut *out, &message_payload(spec.no_match))?;
            stats.outcome = RunOutcome::NoMatch;
            stats.add_rows(1);
            return Ok(stats);
        };

        let id = match first.get("id") {
            Some(JsonValue::Number(n)) => n.to_string(),
            Some(JsonValue::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(Error::decode("search result has no id")),
        };
        debug!(adapter = self.adapter.name, %id, "Fetching first match");

        let url = entity_url(&context.api_base_uri, spec.entity_path, &id)?;
        let entity: EntityEnvelope = client.get_json(&url, &RequestConfig::new()).await?;
        let record = entity
            .data
            .filter(JsonValue::is_object)
            .unwrap_or_else(|| JsonValue::Object(Default::default()));
        stats.add_page(1);

        write_json(&mut *out, &row_payload(&mapper.map(&record)))?;
        stats.add_rows(1);
        Ok(stats)
    }
}

/// Absolute URL of one entity, with `id` encoded as a single path segment
fn entity_url(base: &str, entity_path: &str, id: &str) -> Result<String> {
    let mut url = Url::parse(&format!("{}{entity_path}", base.trim_end_matches('/')))?;
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("Base URI cannot hold a path: {base}")))?
        .push(id);
    Ok(url.into())
}

/// Run an adapter by definition with default settings
pub async fn run_adapter<W: Write>(
    adapter: &'static AdapterDef,
    vars: &InvocationVars,
    input: &JsonValue,
    out: &mut W,
) -> Result<RunStats> {
    AdapterRunner::new(adapter).run(vars, input, out).await
}

#[cfg(test)]
mod tests;

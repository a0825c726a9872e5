//! # pipedrive-extract
//!
//! Data-retrieval adapters over the Pipedrive CRM REST API.
//!
//! Each adapter pages through one Pipedrive collection, maps every raw
//! record through a fixed field map into flat output records, and emits
//! them as newline-delimited JSON or as a JSON table.
//!
//! ## Features
//!
//! - **Offset Pagination**: Follows `additional_data.pagination` until the collection is exhausted
//! - **Retry With Backoff**: Transient 5xx (and optionally 429/503) responses are retried
//! - **Field Maps**: Relations, primary email/phone selection, per-price fan-out
//! - **Projection**: Callers choose output properties by name, `*` for all
//! - **Two Output Shapes**: NDJSON streams and header-plus-rows tables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pipedrive_extract::{lookup, AdapterRunner, InvocationVars, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let vars = InvocationVars::from_json(serde_json::json!({
//!         "pipedrive_connection": {
//!             "access_token": "...",
//!             "api_base_uri": "https://acme.pipedrive.com"
//!         }
//!     }))?;
//!
//!     let input = serde_json::json!(["id,title,value", "status=open"]);
//!     let mut out = std::io::stdout().lock();
//!     AdapterRunner::new(lookup("pipedrive-deals")?)
//!         .run(&vars, &input, &mut out)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Adapter Runner                           │
//! │  vars → ConnectionContext    input → Params    run → RunStats   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Mapping  │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Bearer   │ GET       │ start/limit   │ Field map │ NDJSON      │
//! │ api_token│ Retry     │ Stop rules    │ Projection│ Table       │
//! │          │ Rate Limit│               │ Fan-out   │ Row         │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication schemes
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Offset pagination over the Pipedrive envelope
pub mod pagination;

/// Field maps, projection and record mapping
pub mod mapping;

/// Positional parameter binding
pub mod params;

/// NDJSON and table output
pub mod output;

/// Built-in adapter catalog
pub mod adapters;

/// Invocation variables and connection resolution
pub mod config;

/// Adapter execution
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use adapters::{get_adapter, list_adapters, lookup, AdapterDef, ADAPTERS};
pub use config::{ConnectionContext, InvocationVars};
pub use engine::{run_adapter, AdapterRunner, RunOutcome, RunStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

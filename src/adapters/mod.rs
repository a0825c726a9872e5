//! Built-in Pipedrive adapter definitions
//!
//! Every adapter is one static `AdapterDef`: the endpoint it reads, how it
//! authenticates, the parameters it accepts, the field map it applies, and
//! the shape of its output. The engine runs any definition the same way.

pub mod fields;

use crate::auth::AuthScheme;
use crate::error::{Error, Result};
use crate::http::RetryPolicy;
use crate::mapping::FieldMap;
use crate::params::ParamSpec;
use crate::types::{JsonValue, OutputFormat};
use serde_json::json;

/// Where an adapter reads its connection variables from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    /// `pipedrive_connection { access_token, api_base_uri }`
    Connection,
    /// Flat `pipedrive_api_key` + `company_domain`
    Legacy,
}

impl Credentials {
    /// Variable names the caller must provide
    pub fn required_vars(self) -> &'static [&'static str] {
        match self {
            Credentials::Connection => &[
                "pipedrive_connection.access_token",
                "pipedrive_connection.api_base_uri",
            ],
            Credentials::Legacy => &["pipedrive_api_key", "company_domain"],
        }
    }
}

/// Retry profile selecting a `RetryPolicy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryProfile {
    /// Retry 500/502/504
    Standard,
    /// Also retry 429/503, honoring `Retry-After`
    Throttling,
}

impl RetryProfile {
    /// Policy for this profile
    pub fn policy(self) -> RetryPolicy {
        match self {
            RetryProfile::Standard => RetryPolicy::standard(),
            RetryProfile::Throttling => RetryPolicy::with_throttling(),
        }
    }
}

/// Search-then-fetch settings for enrichment adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichSpec {
    /// `item_type` sent to `/v1/searchResults`
    pub item_type: &'static str,
    /// Collection path the matched id is appended to
    pub entity_path: &'static str,
    /// Single-cell payload emitted when nothing matches
    pub no_match: &'static str,
}

/// What an adapter does with the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Page through the collection, one NDJSON line per record
    Stream,
    /// Page through the collection into a header + rows table
    Table,
    /// Search, fetch the first match, emit a single row
    Enrich(EnrichSpec),
}

/// Static definition of one adapter
#[derive(Debug, Clone, Copy)]
pub struct AdapterDef {
    /// Invocation name
    pub name: &'static str,
    /// Display title
    pub title: &'static str,
    /// One line description
    pub description: &'static str,
    /// Collection path (search path for enrichment)
    pub endpoint: &'static str,
    /// How the credential is presented
    pub auth: AuthScheme,
    /// Where the credential comes from
    pub credentials: Credentials,
    /// What the adapter does
    pub operation: Operation,
    /// Positional parameters
    pub params: &'static [ParamSpec],
    /// Output fields
    pub fields: FieldMap,
    /// Retry behavior
    pub retry: RetryProfile,
    /// Query parameters sent with every page
    pub fixed_params: &'static [(&'static str, &'static str)],
    /// Nested list each record fans out over
    pub fan_out: Option<&'static str>,
}

impl AdapterDef {
    /// Output document shape
    pub fn output_format(&self) -> OutputFormat {
        match self.operation {
            Operation::Stream => OutputFormat::Ndjson,
            Operation::Table => OutputFormat::Table,
            Operation::Enrich(_) => OutputFormat::Row,
        }
    }

    /// Whether missing credentials yield the `[[""]]` payload instead of an error
    pub fn soft_fails_on_missing_credentials(&self) -> bool {
        !matches!(self.operation, Operation::Stream)
    }

    /// Metadata document used by `describe` and the server
    pub fn describe(&self) -> JsonValue {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "endpoint": self.endpoint,
            "auth": self.auth,
            "credentials": self.credentials.required_vars(),
            "output": self.output_format(),
            "content_type": self.output_format().content_type(),
            "params": self.params,
            "returns": self.fields.names().collect::<Vec<_>>(),
        })
    }
}

const STREAM_PARAMS: &[ParamSpec] = &[ParamSpec::properties("*"), ParamSpec::filter()];
const TABLE_PARAMS: &[ParamSpec] = &[ParamSpec::properties("*")];
const ENRICH_PARAMS: &[ParamSpec] = &[ParamSpec::search_term(), ParamSpec::properties("name")];

/// All built-in adapters
pub static ADAPTERS: &[AdapterDef] = &[
    AdapterDef {
        name: "pipedrive-activity",
        title: "Pipedrive Activity",
        description: "Returns a list of activity from Pipedrive",
        endpoint: "/v1/activities",
        auth: AuthScheme::Bearer,
        credentials: Credentials::Connection,
        operation: Operation::Stream,
        params: STREAM_PARAMS,
        fields: fields::ACTIVITY,
        retry: RetryProfile::Standard,
        // every activity the user can see, not only their own
        fixed_params: &[("user_id", "0")],
        fan_out: None,
    },
    AdapterDef {
        name: "pipedrive-deals",
        title: "Pipedrive Deals",
        description: "Returns a list of deals from Pipedrive",
        endpoint: "/v1/deals",
        auth: AuthScheme::Bearer,
        credentials: Credentials::Connection,
        operation: Operation::Stream,
        params: STREAM_PARAMS,
        fields: fields::DEALS,
        retry: RetryProfile::Standard,
        fixed_params: &[],
        fan_out: None,
    },
    AdapterDef {
        name: "pipedrive-people",
        title: "Pipedrive People",
        description: "Returns a list of people from Pipedrive",
        endpoint: "/v1/persons",
        auth: AuthScheme::Bearer,
        credentials: Credentials::Connection,
        operation: Operation::Stream,
        params: STREAM_PARAMS,
        fields: fields::PEOPLE,
        retry: RetryProfile::Throttling,
        fixed_params: &[],
        fan_out: None,
    },
    AdapterDef {
        name: "pipedrive-products",
        title: "Pipedrive Products",
        description: "Returns a list of products from Pipedrive, one row per price",
        endpoint: "/v1/products",
        auth: AuthScheme::Bearer,
        credentials: Credentials::Connection,
        operation: Operation::Stream,
        params: STREAM_PARAMS,
        fields: fields::PRODUCTS,
        retry: RetryProfile::Standard,
        fixed_params: &[],
        fan_out: Some(fields::PRODUCT_PRICES),
    },
    AdapterDef {
        name: "pipedrive-list-orgs",
        title: "Pipedrive Organizations List",
        description: "Returns a list of organizations from Pipedrive",
        endpoint: "/v1/organizations",
        auth: AuthScheme::Bearer,
        credentials: Credentials::Connection,
        operation: Operation::Table,
        params: TABLE_PARAMS,
        fields: fields::ORGANIZATIONS,
        retry: RetryProfile::Standard,
        fixed_params: &[],
        fan_out: None,
    },
    AdapterDef {
        name: "pipedrive-list-deals",
        title: "Pipedrive Deals List",
        description: "Returns a list of deals from Pipedrive",
        endpoint: "/v1/deals",
        auth: AuthScheme::QueryToken,
        credentials: Credentials::Legacy,
        operation: Operation::Table,
        params: TABLE_PARAMS,
        fields: fields::LEGACY_DEALS,
        retry: RetryProfile::Standard,
        fixed_params: &[],
        fan_out: None,
    },
    AdapterDef {
        name: "pipedrive-list-people",
        title: "Pipedrive People List",
        description: "Returns a list of people from Pipedrive",
        endpoint: "/v1/persons",
        auth: AuthScheme::QueryToken,
        credentials: Credentials::Legacy,
        operation: Operation::Table,
        params: TABLE_PARAMS,
        fields: fields::LEGACY_PEOPLE,
        retry: RetryProfile::Standard,
        fixed_params: &[],
        fan_out: None,
    },
    AdapterDef {
        name: "pipedrive-enrich-org",
        title: "Pipedrive Organization Lookup",
        description: "Returns profile information for the organization matching a search term",
        endpoint: "/v1/searchResults",
        auth: AuthScheme::QueryToken,
        credentials: Credentials::Connection,
        operation: Operation::Enrich(EnrichSpec {
            item_type: "organization",
            entity_path: "/v1/organizations",
            no_match: "No organizations match the search term",
        }),
        params: ENRICH_PARAMS,
        fields: fields::ORGANIZATIONS,
        retry: RetryProfile::Standard,
        fixed_params: &[],
        fan_out: None,
    },
    AdapterDef {
        name: "pipedrive-enrich-people",
        title: "Pipedrive Person Lookup",
        description: "Returns profile information for the person matching a search term",
        endpoint: "/v1/searchResults",
        auth: AuthScheme::Bearer,
        credentials: Credentials::Connection,
        operation: Operation::Enrich(EnrichSpec {
            item_type: "person",
            entity_path: "/v1/persons",
            no_match: "No people match the search term",
        }),
        params: ENRICH_PARAMS,
        fields: fields::LEGACY_PEOPLE,
        retry: RetryProfile::Standard,
        fixed_params: &[],
        fan_out: None,
    },
];

/// Get a built-in adapter by name
pub fn get_adapter(name: &str) -> Option<&'static AdapterDef> {
    ADAPTERS.iter().find(|a| a.name == name)
}

/// Get a built-in adapter by name, failing on unknown names
pub fn lookup(name: &str) -> Result<&'static AdapterDef> {
    get_adapter(name).ok_or_else(|| Error::UnknownAdapter {
        name: name.to_string(),
    })
}

/// Names of all built-in adapters
pub fn list_adapters() -> Vec<&'static str> {
    ADAPTERS.iter().map(|a| a.name).collect()
}

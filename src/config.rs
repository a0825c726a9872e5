//! Invocation configuration
//!
//! Connection variables arrive per invocation, either as the
//! `pipedrive_connection` object or as the legacy flat
//! `pipedrive_api_key` + `company_domain` pair. Anything not supplied
//! falls back to the environment.

use crate::adapters::Credentials;
use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Env var holding the OAuth access token
pub const ENV_ACCESS_TOKEN: &str = "PIPEDRIVE_ACCESS_TOKEN";
/// Env var holding the API base URI
pub const ENV_API_BASE_URI: &str = "PIPEDRIVE_API_BASE_URI";
/// Env var holding the legacy API key
pub const ENV_API_KEY: &str = "PIPEDRIVE_API_KEY";
/// Env var holding the legacy company domain
pub const ENV_COMPANY_DOMAIN: &str = "PIPEDRIVE_COMPANY_DOMAIN";

// ============================================================================
// Invocation Variables
// ============================================================================

/// Variables supplied with one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationVars {
    /// OAuth connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipedrive_connection: Option<ConnectionVars>,

    /// Legacy API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipedrive_api_key: Option<String>,

    /// Legacy company subdomain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

/// `pipedrive_connection` object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionVars {
    /// Bearer token
    #[serde(default)]
    pub access_token: Option<String>,

    /// API base, e.g. `https://acme.pipedrive.com`
    #[serde(default)]
    pub api_base_uri: Option<String>,
}

/// Optional HTTP client settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds; unbounded when absent
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Client-side request budget
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Retries after the first attempt; `0` disables retrying
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Delay growth between retries
    #[serde(default)]
    pub backoff: Option<BackoffType>,
}

impl InvocationVars {
    /// Parse variables from a JSON value
    pub fn from_json(value: JsonValue) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::config("configuration must be a JSON object"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parse variables from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(text)?)
    }

    /// Load variables from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Fill unset credentials from the process environment
    #[must_use]
    pub fn with_env_fallback(self) -> Self {
        self.with_fallback(|key| std::env::var(key).ok())
    }

    /// Fill unset credentials from `lookup`.
    ///
    /// Credentials are taken as pairs: the connection's token and base URI
    /// only when the caller supplied neither, and the legacy key and domain
    /// likewise. A caller-supplied base URI is never paired with a token
    /// from `lookup`.
    #[must_use]
    pub fn with_fallback<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection = self.pipedrive_connection.get_or_insert_with(Default::default);
        if is_blank(&connection.access_token) && is_blank(&connection.api_base_uri) {
            connection.access_token = lookup(ENV_ACCESS_TOKEN);
            connection.api_base_uri = lookup(ENV_API_BASE_URI);
        }
        if is_blank(&self.pipedrive_api_key) && is_blank(&self.company_domain) {
            self.pipedrive_api_key = lookup(ENV_API_KEY);
            self.company_domain = lookup(ENV_COMPANY_DOMAIN);
        }
        self
    }

    /// Resolve the connection for an adapter's credential style
    pub fn connection(&self, credentials: Credentials) -> Result<ConnectionContext> {
        match credentials {
            Credentials::Connection => {
                let connection = self.pipedrive_connection.clone().unwrap_or_default();
                let access_token = connection
                    .access_token
                    .none_if_empty()
                    .ok_or_else(|| Error::missing_field("pipedrive_connection.access_token"))?;
                let api_base_uri = connection
                    .api_base_uri
                    .none_if_empty()
                    .ok_or_else(|| Error::missing_field("pipedrive_connection.api_base_uri"))?;
                ConnectionContext::new(access_token, api_base_uri)
            }
            Credentials::Legacy => {
                let api_key = self
                    .pipedrive_api_key
                    .clone()
                    .none_if_empty()
                    .ok_or_else(|| Error::missing_field("pipedrive_api_key"))?;
                let domain = self
                    .company_domain
                    .clone()
                    .none_if_empty()
                    .ok_or_else(|| Error::missing_field("company_domain"))?;
                ConnectionContext::new(api_key, company_base_uri(&domain))
            }
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.clone().none_if_empty().is_none()
}

/// Base URI of a company's Pipedrive account
pub fn company_base_uri(domain: &str) -> String {
    format!("https://{}.pipedrive.com", domain.trim())
}

// ============================================================================
// Connection Context
// ============================================================================

/// Resolved credential and API base, immutable for the run
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionContext {
    /// Token presented upstream
    pub access_token: String,
    /// API base without a trailing slash
    pub api_base_uri: String,
}

impl ConnectionContext {
    /// Create a context, validating the base URI
    pub fn new(access_token: impl Into<String>, api_base_uri: impl Into<String>) -> Result<Self> {
        let api_base_uri = api_base_uri.into().trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&api_base_uri)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "api_base_uri must be an http(s) URL, got '{api_base_uri}'"
            )));
        }
        Ok(Self {
            access_token: access_token.into(),
            api_base_uri,
        })
    }
}

impl std::fmt::Debug for ConnectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionContext")
            .field("access_token", &"[REDACTED]")
            .field("api_base_uri", &self.api_base_uri)
            .finish()
    }
}

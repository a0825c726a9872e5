//! Auth configuration types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Query parameter carrying the legacy API token
pub const API_TOKEN_PARAM: &str = "api_token";

/// How an adapter presents its credential upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>` header
    #[default]
    Bearer,
    /// `?api_token=<token>` query parameter
    QueryToken,
}

/// Authentication configuration resolved for one run
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Legacy API token passed in the query string
    ApiToken {
        /// The API token value
        token: String,
    },
}

impl AuthConfig {
    /// Build the auth config for a scheme and credential
    pub fn for_scheme(scheme: AuthScheme, token: impl Into<String>) -> Self {
        match scheme {
            AuthScheme::Bearer => Self::Bearer {
                token: token.into(),
            },
            AuthScheme::QueryToken => Self::ApiToken {
                token: token.into(),
            },
        }
    }

    /// Check whether any credential is attached
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Credentials never reach logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
            Self::ApiToken { .. } => f.debug_struct("ApiToken").field("token", &"***").finish(),
        }
    }
}

//! Authentication module
//!
//! Supports: Bearer token (OAuth connection) and the legacy `api_token` query parameter.
//!
//! The `Authenticator` decorates every outgoing request. It holds no token
//! cache; neither scheme refreshes within a run.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, AuthScheme, API_TOKEN_PARAM};

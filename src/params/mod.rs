//! Invocation parameters
//!
//! Each adapter declares an ordered schema of `ParamSpec`s. Invocation
//! input is a JSON array bound to that schema by position and validated
//! before any network call, producing an immutable `Params`.

mod binder;
mod types;

pub use binder::{bind, bind_str, normalize_names, parse_query, reject_reserved};
pub use types::{ParamKind, ParamSpec, ParamValue, Params};

#[cfg(test)]
mod tests;

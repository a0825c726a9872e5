//! Positional binding of invocation input to a parameter schema

use super::types::{ParamKind, ParamSpec, ParamValue, Params};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use tracing::debug;

/// Bind a JSON array positionally to `schema` and validate every value.
///
/// Extra positional values are ignored. `null` counts as omitted.
pub fn bind(schema: &[ParamSpec], input: &JsonValue) -> Result<Params> {
    let args = input
        .as_array()
        .ok_or_else(|| Error::invalid_input("input must be a JSON array"))?;

    if args.len() > schema.len() {
        debug!(
            supplied = args.len(),
            declared = schema.len(),
            "Ignoring extra positional input"
        );
    }

    let mut values = Vec::with_capacity(schema.len());
    for (index, spec) in schema.iter().enumerate() {
        let supplied = args.get(index).filter(|v| !v.is_null());
        if let Some(value) = bind_one(spec, supplied)? {
            values.push((spec.name, value));
        }
    }

    Ok(Params::from_values(values))
}

/// Parse invocation input text and bind it. Blank input binds as `[]`.
pub fn bind_str(schema: &[ParamSpec], input: &str) -> Result<Params> {
    if input.trim().is_empty() {
        return bind(schema, &JsonValue::Array(Vec::new()));
    }
    let value: JsonValue = serde_json::from_str(input)
        .map_err(|e| Error::invalid_input(format!("input is not valid JSON: {e}")))?;
    bind(schema, &value)
}

fn bind_one(spec: &ParamSpec, supplied: Option<&JsonValue>) -> Result<Option<ParamValue>> {
    let Some(value) = supplied else {
        if spec.required {
            return Err(Error::MissingParam {
                param: spec.name.to_string(),
            });
        }
        return Ok(spec.default.map(|d| default_value(spec.kind, d)));
    };

    match spec.kind {
        ParamKind::Text => {
            let text = value
                .as_str()
                .ok_or_else(|| Error::invalid_param(spec.name, "must be a string"))?;
            if text.chars().count() < spec.min_len {
                return Err(Error::invalid_param(
                    spec.name,
                    format!("must be at least {} characters", spec.min_len),
                ));
            }
            Ok(Some(ParamValue::Text(text.to_string())))
        }
        ParamKind::List => {
            let names = normalize_names(collect_names(spec.name, value)?);
            if names.is_empty() {
                return Ok(spec.default.map(|d| default_value(spec.kind, d)));
            }
            Ok(Some(ParamValue::List(names)))
        }
        ParamKind::Query => {
            let query = value
                .as_str()
                .ok_or_else(|| Error::invalid_param(spec.name, "must be a URL query string"))?;
            Ok(Some(ParamValue::Pairs(parse_query(query))))
        }
    }
}

fn default_value(kind: ParamKind, default: &str) -> ParamValue {
    match kind {
        ParamKind::Text => ParamValue::Text(default.to_string()),
        ParamKind::List => ParamValue::List(normalize_names(
            default.split(',').map(str::to_string).collect(),
        )),
        ParamKind::Query => ParamValue::Pairs(parse_query(default)),
    }
}

/// Accept `"a,b"`, `["a","b"]` or `[["a"],"b"]` (one level of nesting)
fn collect_names(param: &str, value: &JsonValue) -> Result<Vec<String>> {
    let invalid = || Error::invalid_param(param, "must be a string or a list of strings");

    match value {
        JsonValue::String(s) => Ok(s.split(',').map(str::to_string).collect()),
        JsonValue::Array(items) => {
            let mut names = Vec::new();
            for item in items {
                match item {
                    JsonValue::String(s) => names.push(s.clone()),
                    JsonValue::Array(nested) => {
                        for inner in nested {
                            names.push(inner.as_str().ok_or_else(invalid)?.to_string());
                        }
                    }
                    _ => return Err(invalid()),
                }
            }
            Ok(names)
        }
        _ => Err(invalid()),
    }
}

/// Lowercase and trim each name, dropping blanks and repeats
pub fn normalize_names(raw: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let name = name.trim().to_lowercase();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Split a URL query string into decoded pairs, keeping order
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.trim().trim_start_matches('?');
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Fail when a query parameter sets any `reserved` key
pub fn reject_reserved(param: &str, pairs: &[(String, String)], reserved: &[&str]) -> Result<()> {
    match pairs.iter().find(|(key, _)| reserved.contains(&key.as_str())) {
        Some((key, _)) => Err(Error::invalid_param(
            param,
            format!("`{key}` is set by the adapter and cannot be filtered on"),
        )),
        None => Ok(()),
    }
}

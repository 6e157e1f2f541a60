//! HTTP endpoint handlers.
//!
//! Each submodule groups the endpoints of one behavior family. Handlers
//! stay thin: they parse parameters, invoke the introspection/streaming
//! core, and shape the response.

pub mod auth;
pub mod caching;
pub mod cookies;
pub mod dynamic;
pub mod formats;
pub mod inspection;
pub mod methods;
pub mod redirect;
pub mod status;

use std::collections::HashMap;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use url::form_urlencoded;

use crate::error::ServiceError;
use crate::inspect::{project, to_pretty_json, RequestDescriptor};

/// Decode the raw query string into a first-value-wins map.
pub(crate) fn query_map(query: Option<&str>) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if let Some(query) = query {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            map.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
    }
    map
}

/// Parse a non-negative float parameter, falling back to a default when
/// the value is absent. Absent with no fallback, non-numeric, negative
/// and non-finite values are all client errors.
pub(crate) fn parse_float(
    raw: Option<&str>,
    fallback: Option<f64>,
    label: &str,
) -> Result<f64, ServiceError> {
    let invalid = || ServiceError::BadRequest(format!("Invalid {label}"));
    let value = match raw.filter(|v| !v.is_empty()) {
        Some(v) => v.parse::<f64>().map_err(|_| invalid())?,
        None => fallback.ok_or_else(invalid)?,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// Standard echo response: the projected descriptor as indented JSON.
pub(crate) fn projection_response(
    descriptor: &RequestDescriptor,
    keys: &[&str],
) -> Result<Response, ServiceError> {
    let body = to_pretty_json(&project(descriptor, keys))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_map_first_value_wins() {
        let map = query_map(Some("a=1&a=2&b=x"));
        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "x");
    }

    #[test]
    fn test_parse_float_fallback() {
        assert_eq!(parse_float(None, Some(2.0), "duration").unwrap(), 2.0);
        assert_eq!(parse_float(Some(""), Some(10.0), "numbytes").unwrap(), 10.0);
        assert_eq!(parse_float(Some("3.5"), Some(2.0), "duration").unwrap(), 3.5);
    }

    #[test]
    fn test_parse_float_rejects_garbage() {
        assert!(parse_float(Some("abc"), Some(2.0), "duration").is_err());
        assert!(parse_float(Some("-1"), Some(2.0), "duration").is_err());
        assert!(parse_float(Some("1e999"), Some(2.0), "duration").is_err());
        assert!(parse_float(None, None, "delay").is_err());
    }
}

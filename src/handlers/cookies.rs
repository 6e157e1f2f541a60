//! Cookie echo endpoints: `/cookies`, `/cookies/set`,
//! `/cookies/set/{name}/{value}`, `/cookies/delete`.
//!
//! Stateless like everything else: "set" and "delete" only emit
//! `Set-Cookie` headers and bounce the client back to `/cookies`.

use axum::extract::{Path, RawQuery};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use url::form_urlencoded;

use super::query_map;
use crate::error::ServiceError;
use crate::inspect::to_pretty_json;

/// Analytics cookies hidden from the listing unless `show_env` is set.
const ENV_COOKIES: &[&str] = &[
    "_gauges_unique",
    "_gauges_unique_year",
    "_gauges_unique_month",
    "_gauges_unique_day",
    "_gauges_unique_hour",
    "__utmz",
    "__utma",
    "__utmb",
];

const COOKIE_MAX_AGE_SECS: u32 = 3200;

pub async fn cookies(
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, ServiceError> {
    let show_env = query_map(query.as_deref()).contains_key("show_env");

    let mut listed = Map::new();
    for (name, value) in request_cookies(&headers) {
        if show_env || !ENV_COOKIES.contains(&name.as_str()) {
            listed.insert(name, Value::String(value));
        }
    }

    let mut payload = Map::new();
    payload.insert("cookies".to_string(), Value::Object(listed));
    let body = to_pretty_json(&payload)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub async fn set(RawQuery(query): RawQuery) -> Response {
    let mut headers = HeaderMap::new();
    append_set_cookies(&mut headers, query.as_deref());
    redirect_to_cookies(headers)
}

pub async fn set_named(
    Path((name, value)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> Response {
    let mut headers = HeaderMap::new();
    if !name.is_empty() && !value.is_empty() {
        append_cookie(&mut headers, &name, &value);
    }
    append_set_cookies(&mut headers, query.as_deref());
    redirect_to_cookies(headers)
}

pub async fn delete(RawQuery(query): RawQuery) -> Response {
    let mut headers = HeaderMap::new();
    if let Some(query) = query.as_deref() {
        for (name, _) in form_urlencoded::parse(query.as_bytes()) {
            let expired = format!("{name}=; Path=/; Max-Age=0");
            if let Ok(value) = HeaderValue::from_str(&expired) {
                headers.append(header::SET_COOKIE, value);
            }
        }
    }
    redirect_to_cookies(headers)
}

fn append_set_cookies(headers: &mut HeaderMap, query: Option<&str>) {
    let Some(query) = query else { return };
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        append_cookie(headers, &name, &value);
    }
}

fn append_cookie(headers: &mut HeaderMap, name: &str, value: &str) {
    let cookie = format!("{name}={value}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

fn redirect_to_cookies(mut headers: HeaderMap) -> Response {
    headers.insert(header::LOCATION, HeaderValue::from_static("/cookies"));
    (StatusCode::FOUND, headers).into_response()
}

/// Parse the `Cookie` request header(s) into name/value pairs.
fn request_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|line| line.split("; "))
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_string(), value.to_string()))
        })
        .collect()
}

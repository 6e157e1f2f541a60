//! Conditional-request and header-reflection endpoints: `/cache`,
//! `/cache/{value}`, `/etag/{etag}`, `/response-headers`.

use std::net::SocketAddr;
use std::time::SystemTime;

use axum::extract::{ConnectInfo, Path, RawQuery, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use url::form_urlencoded;
use uuid::Uuid;

use super::projection_response;
use crate::error::ServiceError;
use crate::http::server::AppState;
use crate::inspect::descriptor::{self, canonical_header_name};
use crate::inspect::to_pretty_json;

const CACHE_KEYS: &[&str] = &["args", "headers", "origin", "url"];

pub async fn cache(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    if parts.headers.contains_key(header::IF_MODIFIED_SINCE)
        || parts.headers.contains_key(header::IF_NONE_MATCH)
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let last_modified = httpdate::fmt_http_date(SystemTime::now());
    let etag = Uuid::new_v4().to_string();

    let descriptor = descriptor::build(&parts, peer, state.secure);
    let inner = projection_response(&descriptor, CACHE_KEYS)?;
    Ok((
        [(header::LAST_MODIFIED, last_modified), (header::ETAG, etag)],
        inner,
    )
        .into_response())
}

pub async fn cache_control(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(value): Path<String>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    let descriptor = descriptor::build(&parts, peer, state.secure);
    let inner = projection_response(&descriptor, CACHE_KEYS)?;
    Ok((
        [(header::CACHE_CONTROL, format!("public, max-age={value}"))],
        inner,
    )
        .into_response())
}

pub async fn etag(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(etag): Path<String>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    let if_none_match = first_header_value(&parts.headers, header::IF_NONE_MATCH);
    let if_match = first_header_value(&parts.headers, header::IF_MATCH);

    if !if_none_match.is_empty() && etag_listed(&if_none_match, &etag) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    if !if_match.is_empty() && !etag_listed(&if_match, &etag) {
        return Ok(StatusCode::PRECONDITION_FAILED.into_response());
    }

    let descriptor = descriptor::build(&parts, peer, state.secure);
    let inner = projection_response(&descriptor, CACHE_KEYS)?;
    Ok(([(header::ETAG, etag)], inner).into_response())
}

/// Reflect query parameters into the response headers and return the
/// resulting header map as JSON.
pub async fn response_headers(RawQuery(query): RawQuery) -> Result<Response, ServiceError> {
    let mut headers = HeaderMap::new();
    if let Some(query) = &query {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let name = HeaderName::try_from(key.as_ref());
            let value = HeaderValue::from_str(&value);
            if let (Ok(name), Ok(value)) = (name, value) {
                headers.append(name, value);
            }
        }
    }
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let mut reflected = Map::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        reflected.insert(canonical_header_name(name.as_str()), Value::String(joined));
    }

    let body = to_pretty_json(&reflected)?;
    Ok((headers, body).into_response())
}

/// `If-Match`/`If-None-Match` values are `", "`-separated lists; `*`
/// matches anything.
fn etag_listed(list: &str, etag: &str) -> bool {
    list.split(", ").any(|entry| entry == etag || entry == "*")
}

fn first_header_value(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

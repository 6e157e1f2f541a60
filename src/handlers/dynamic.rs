//! Timed and generated payload endpoints: `/delay`, `/drip`, `/range`,
//! `/links`, `/bytes`, `/base64`.
//!
//! # Responsibilities
//! - Parse and validate the numeric knobs (400 on garbage, before any
//!   output is produced)
//! - Clamp sizes to the service caps instead of rejecting
//! - Drive the streaming engine for paced bodies

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, Path, RawQuery, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::{parse_float, projection_response, query_map};
use crate::error::ServiceError;
use crate::http::server::AppState;
use crate::inspect::descriptor;
use crate::stream::body::{drip_stream, range_stream};
use crate::stream::{pacing, resolve, ResolvedRange};

/// Byte-length cap for `/bytes` and `/range`; larger requests are clamped.
const MAX_STREAM_BYTES: f64 = 100.0 * 1024.0;
/// Anchor-count cap for `/links`.
const MAX_LINKS: f64 = 200.0;

const DELAY_KEYS: &[&str] = &["url", "args", "form", "data", "origin", "headers", "files"];

pub async fn delay(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(delay): Path<String>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    let delay = parse_float(Some(&delay), None, "delay")?;
    pacing::pause(delay).await;

    let descriptor = descriptor::build(&parts, peer, state.secure);
    projection_response(&descriptor, DELAY_KEYS)
}

pub async fn drip(RawQuery(query): RawQuery) -> Result<Response, ServiceError> {
    let params = query_map(query.as_deref());
    let duration = parse_float(params.get("duration").map(String::as_str), Some(2.0), "duration")?;
    let numbytes =
        parse_float(params.get("numbytes").map(String::as_str), Some(10.0), "numbytes")? as u64;
    let delay = parse_float(params.get("delay").map(String::as_str), Some(0.0), "delay")?;
    let status = params
        .get("code")
        .map(String::as_str)
        .unwrap_or("200")
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ServiceError::BadRequest("Invalid status code provided".to_string()))?;

    pacing::pause(delay).await;

    let pause_each = if numbytes == 0 { 0.0 } else { duration / numbytes as f64 };
    let body = Body::from_stream(drip_stream(numbytes, pause_each));

    Ok((
        status,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_LENGTH, numbytes.to_string()),
        ],
        body,
    )
        .into_response())
}

pub async fn range(
    Path(numbytes): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    let numbytes = parse_float(Some(&numbytes), None, "numbytes")?.min(MAX_STREAM_BYTES) as u64;

    let params = query_map(query.as_deref());
    let chunk_size = parse_float(
        params.get("chunk_size").map(String::as_str),
        Some(10240.0),
        "chunk_size",
    )? as u64;
    let duration = parse_float(params.get("duration").map(String::as_str), Some(0.0), "duration")?;

    let range_header = headers
        .get(header::RANGE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let resolved = resolve(range_header.as_deref(), numbytes);
    let etag = format!("range{numbytes}");

    let ResolvedRange::Satisfiable { first, last } = resolved else {
        return Ok((
            StatusCode::RANGE_NOT_SATISFIABLE,
            [
                (header::ETAG, etag),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CONTENT_LENGTH, "0".to_string()),
                (header::CONTENT_RANGE, format!("bytes */{numbytes}")),
            ],
        )
            .into_response());
    };

    let status = if resolved.is_full(numbytes) {
        StatusCode::OK
    } else {
        StatusCode::PARTIAL_CONTENT
    };
    let pause_per_byte = duration / numbytes as f64;
    let body = Body::from_stream(range_stream(first, last, chunk_size, pause_per_byte));

    Ok((
        status,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::ETAG, etag),
            (header::ACCEPT_RANGES, "bytes".to_string()),
            (header::CONTENT_RANGE, format!("bytes {first}-{last}/{numbytes}")),
            (header::CONTENT_LENGTH, resolved.len().to_string()),
        ],
        body,
    )
        .into_response())
}

pub async fn links(Path((n, offset)): Path<(String, String)>) -> Result<Response, ServiceError> {
    let n = parse_float(Some(&n), None, "number of links")?.min(MAX_LINKS) as u64;
    let offset = parse_float(Some(&offset), None, "offset")? as u64;

    let mut html = String::from("<html><head><title>Links</title></head><body>");
    for i in 0..n {
        if i == offset {
            html.push_str(&format!("{i} "));
        } else {
            html.push_str(&format!("<a href='/links/{n}/{i}'>{i}</a> "));
        }
    }
    html.push_str("</body></html>");

    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response())
}

pub async fn bytes(
    Path(n): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ServiceError> {
    let n = parse_float(Some(&n), None, "numbytes")?.min(MAX_STREAM_BYTES) as usize;
    let params = query_map(query.as_deref());

    let mut payload = vec![0u8; n];
    match params.get("seed").and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed).fill_bytes(&mut payload),
        None => rand::thread_rng().fill_bytes(&mut payload),
    }

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        payload,
    )
        .into_response())
}

pub async fn base64_decode(Path(value): Path<String>) -> Result<Response, ServiceError> {
    let decoded = BASE64
        .decode(value.as_bytes())
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        decoded,
    )
        .into_response())
}

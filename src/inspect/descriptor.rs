//! Canonical request descriptor.
//!
//! # Responsibilities
//! - Normalize an inbound request head into a fixed attribute record
//! - Reconstruct the absolute request URL
//! - Flatten multi-valued headers and query parameters
//! - Resolve the client origin (X-Forwarded-For, then peer address)
//!
//! # Design Decisions
//! - Building never fails: absent headers yield empty strings/maps
//! - Multi-valued headers and args are comma-joined into one string per
//!   key; lossy for values containing commas and kept that way on purpose
//! - Header names are rendered in canonical title case to match the
//!   output of the reference service

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Uri};
use url::form_urlencoded;

/// The canonical in-memory record of one inbound request's observable
/// attributes. Built fresh per request and discarded when the response
/// is sent; there is no cross-request state.
///
/// `data`, `json`, `files` and `form` are placeholders: the body is not
/// parsed into them, they serialize as empty values.
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    pub args: BTreeMap<String, String>,
    pub data: String,
    pub files: BTreeMap<String, String>,
    pub form: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub json: String,
    pub method: String,
    pub origin: String,
    pub url: String,
    pub user_agent: String,
}

/// Build a descriptor from a request head.
///
/// `secure` reflects whether the listener presents transport security and
/// drives the reconstructed URL scheme.
pub fn build(parts: &Parts, peer: SocketAddr, secure: bool) -> RequestDescriptor {
    RequestDescriptor {
        args: flatten_args(&parts.uri),
        data: String::new(),
        files: BTreeMap::new(),
        form: BTreeMap::new(),
        headers: flatten_headers(&parts.headers),
        json: String::new(),
        method: parts.method.to_string(),
        origin: resolve_origin(&parts.headers, peer),
        url: reconstruct_url(&parts.uri, &parts.headers, secure),
        user_agent: header_value(&parts.headers, header::USER_AGENT.as_str()),
    }
}

/// Absolute request URL: an already-absolute URI is used verbatim,
/// otherwise `scheme://host+path+query` is composed.
fn reconstruct_url(uri: &Uri, headers: &HeaderMap, secure: bool) -> String {
    if uri.scheme().is_some() {
        return uri.to_string();
    }

    let scheme = if secure { "https" } else { "http" };
    let host = headers
        .get(header::HOST)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("{}://{}{}", scheme, host, path_and_query)
}

fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flattened = BTreeMap::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        flattened.insert(canonical_header_name(name.as_str()), joined);
    }
    flattened
}

fn flatten_args(uri: &Uri) -> BTreeMap<String, String> {
    let mut args: BTreeMap<String, String> = BTreeMap::new();
    let Some(query) = uri.query() else {
        return args;
    };
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match args.get_mut(key.as_ref()) {
            Some(existing) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => {
                args.insert(key.into_owned(), value.into_owned());
            }
        }
    }
    args
}

fn resolve_origin(headers: &HeaderMap, peer: SocketAddr) -> String {
    let forwarded = header_value(headers, "x-forwarded-for");
    if !forwarded.is_empty() {
        return forwarded;
    }
    peer.to_string()
}

/// First value of a header, or the empty string.
fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Title-case a header name segment-by-segment (`user-agent` becomes
/// `User-Agent`), matching the canonical form clients expect to read back.
pub(crate) fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    fn peer() -> SocketAddr {
        "192.0.2.1:1234".parse().unwrap()
    }

    fn parts_for(request: Request<Body>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_absolute_url_used_verbatim() {
        let parts = parts_for(
            Request::builder()
                .method("DELETE")
                .uri("http://hbg.com/delete?some_param=2")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.url, "http://hbg.com/delete?some_param=2");
    }

    #[test]
    fn test_relative_url_reconstructed_from_host() {
        let parts = parts_for(
            Request::builder()
                .uri("/delete?test=test2")
                .header("Host", "localhost:8080")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.url, "http://localhost:8080/delete?test=test2");
    }

    #[test]
    fn test_secure_listener_yields_https_scheme() {
        let parts = parts_for(
            Request::builder()
                .uri("/get")
                .header("Host", "localhost:8443")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), true);
        assert_eq!(descriptor.url, "https://localhost:8443/get");
    }

    #[test]
    fn test_multi_valued_headers_joined() {
        let parts = parts_for(
            Request::builder()
                .uri("/get")
                .header("test", "test1")
                .header("test", "test2")
                .header("Accept", "*/*")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.headers["Test"], "test1,test2");
        assert_eq!(descriptor.headers["Accept"], "*/*");
    }

    #[test]
    fn test_origin_falls_back_to_peer() {
        let parts = parts_for(Request::builder().uri("/get").body(Body::empty()).unwrap());
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.origin, "192.0.2.1:1234");
    }

    #[test]
    fn test_origin_prefers_forwarded_for() {
        let parts = parts_for(
            Request::builder()
                .uri("/get")
                .header("X-Forwarded-For", "1.1.1.1")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.origin, "1.1.1.1");
    }

    #[test]
    fn test_repeated_args_joined() {
        let parts = parts_for(
            Request::builder()
                .uri("/get?a=1&a=2&Something=1")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.args["a"], "1,2");
        assert_eq!(descriptor.args["Something"], "1");
    }

    #[test]
    fn test_arg_with_literal_comma_preserved() {
        let parts = parts_for(
            Request::builder()
                .uri("/get?test=test1,test2")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.args["test"], "test1,test2");
    }

    #[test]
    fn test_user_agent_and_method() {
        let parts = parts_for(
            Request::builder()
                .method("POST")
                .uri("/post")
                .header("User-Agent", "curl/8.0")
                .body(Body::empty())
                .unwrap(),
        );
        let descriptor = build(&parts, peer(), false);
        assert_eq!(descriptor.method, "POST");
        assert_eq!(descriptor.user_agent, "curl/8.0");
    }

    #[test]
    fn test_canonical_header_name() {
        assert_eq!(canonical_header_name("user-agent"), "User-Agent");
        assert_eq!(canonical_header_name("x-forwarded-for"), "X-Forwarded-For");
        assert_eq!(canonical_header_name("accept"), "Accept");
    }
}

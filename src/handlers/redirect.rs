//! `/redirect-to`: redirect to a caller-supplied URL.
//!
//! The target is echoed into `Location` verbatim, with no validation.
//! That open redirect is the point of the endpoint: clients under test
//! need to be sent anywhere, including somewhere hostile.

use axum::extract::RawQuery;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use super::query_map;

/// Pick the redirect status: the `status_code` parameter when it parses
/// and lies in `[300, 400)`, otherwise `302`.
pub fn redirect_status(raw: Option<&str>) -> StatusCode {
    raw.and_then(|v| v.parse::<u16>().ok())
        .filter(|code| (300..400).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::FOUND)
}

pub async fn redirect_to(RawQuery(query): RawQuery) -> Response {
    let params = query_map(query.as_deref());
    let status = redirect_status(params.get("status_code").map(String::as_str));
    let target = params.get("url").map(String::as_str).unwrap_or_default();

    let mut response = status.into_response();
    if let Ok(location) = HeaderValue::from_str(target) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    response
}

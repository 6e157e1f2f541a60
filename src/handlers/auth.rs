//! Credential echo endpoints: `/basic-auth/{user}/{password}`, `/bearer`.
//!
//! These compare presented credentials against caller-chosen expectations
//! so HTTP clients can exercise their auth plumbing. They are not a
//! security system; the only hardening kept is the constant-time compare
//! on the basic-auth path.

use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

use crate::error::ServiceError;

const BASIC_CHALLENGE: &str = "Basic realm=\"Fake Realm\"";

#[derive(Serialize)]
struct AuthResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

pub async fn basic_auth(
    Path((user, password)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(decode_basic);

    let authenticated = match &presented {
        Some((presented_user, presented_password)) => {
            // Both comparisons always run; no short-circuit on the user.
            ct_eq(presented_user.as_bytes(), user.as_bytes())
                & ct_eq(presented_password.as_bytes(), password.as_bytes())
        }
        None => false,
    };

    if !authenticated {
        return Ok((
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)],
            "Unauthorized.\n",
        )
            .into_response());
    }

    auth_json(AuthResponse {
        authenticated: true,
        token: None,
        user: Some(user),
    })
}

pub async fn bearer(headers: HeaderMap) -> Result<Response, ServiceError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return Err(ServiceError::Unauthorized);
    };

    auth_json(AuthResponse {
        authenticated: true,
        token: Some(token.to_string()),
        user: None,
    })
}

fn auth_json(payload: AuthResponse) -> Result<Response, ServiceError> {
    let mut body = serde_json::to_string_pretty(&payload)?;
    body.push('\n');
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// `Basic <base64(user:password)>` → the decoded pair.
fn decode_basic(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim().as_bytes()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (user, password) = credentials.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Constant-time equality: every byte is examined regardless of where the
/// first mismatch occurs.
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut acc: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        acc |= x ^ y;
    }
    acc == 0
}

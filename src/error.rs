//! Request-level error taxonomy.
//!
//! # Responsibilities
//! - Classify handler failures (client input, auth, encoding)
//! - Map each class to its HTTP status and body
//!
//! # Design Decisions
//! - Errors are local to one request; nothing propagates across requests
//! - JSON encoding failure is the only fatal-to-the-request category,
//!   and it never crashes the process

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error returned by request handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed client input (numeric parameter, base64 payload).
    #[error("{0}")]
    BadRequest(String),

    /// Missing or wrong credentials on an auth endpoint.
    #[error("Unauthorized")]
    Unauthorized,

    /// A `/status` candidate that is not a usable HTTP status code.
    #[error("{0}")]
    StatusCandidate(String),

    /// JSON serialization failed while building a response body.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::StatusCandidate(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let res = ServiceError::BadRequest("Invalid duration".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = ServiceError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = ServiceError::StatusCandidate("invalid digit".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

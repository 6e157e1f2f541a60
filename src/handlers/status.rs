//! `/status/{codes}`: answer with one of the listed status codes.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rand::Rng;

use crate::error::ServiceError;

/// Parse the comma-separated candidate list. Any candidate that is not a
/// usable HTTP status code fails the whole request with `500`.
pub fn parse_candidates(raw: &str) -> Result<Vec<StatusCode>, ServiceError> {
    raw.split(',')
        .map(|candidate| {
            let code = candidate
                .trim()
                .parse::<u16>()
                .map_err(|e| ServiceError::StatusCandidate(e.to_string()))?;
            StatusCode::from_u16(code).map_err(|e| ServiceError::StatusCandidate(e.to_string()))
        })
        .collect()
}

/// Uniformly select one candidate. The random source is passed in so
/// selection is deterministic under test.
pub fn pick<R: Rng>(candidates: &[StatusCode], rng: &mut R) -> StatusCode {
    candidates[rng.gen_range(0..candidates.len())]
}

pub async fn status_codes(Path(codes): Path<String>) -> Result<Response, ServiceError> {
    let candidates = parse_candidates(&codes)?;
    let code = pick(&candidates, &mut rand::thread_rng());
    Ok(code.into_response())
}

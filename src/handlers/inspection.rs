//! Single-field inspection endpoints: `/headers`, `/ip`, `/user-agent`.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::request::Parts;
use axum::response::Response;

use super::projection_response;
use crate::error::ServiceError;
use crate::http::server::AppState;
use crate::inspect::descriptor;

const HEADERS_KEYS: &[&str] = &["headers"];
const IP_KEYS: &[&str] = &["origin"];
const USER_AGENT_KEYS: &[&str] = &["user-agent"];

pub async fn headers(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    let descriptor = descriptor::build(&parts, peer, state.secure);
    projection_response(&descriptor, HEADERS_KEYS)
}

pub async fn ip(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    let descriptor = descriptor::build(&parts, peer, state.secure);
    projection_response(&descriptor, IP_KEYS)
}

pub async fn user_agent(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    let descriptor = descriptor::build(&parts, peer, state.secure);
    projection_response(&descriptor, USER_AGENT_KEYS)
}

//! Verb echo endpoints: `/get`, `/post`, `/put`, `/patch`, `/delete`,
//! and the catch-all `/anything`.
//!
//! Each endpoint declares a fixed projection subset; `/get` notably omits
//! the body placeholders, and `/anything` is the only set that includes
//! `method`.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::request::Parts;
use axum::response::Response;

use super::projection_response;
use crate::error::ServiceError;
use crate::http::server::AppState;
use crate::inspect::descriptor;

const GET_KEYS: &[&str] = &["url", "args", "headers", "origin"];
const ECHO_KEYS: &[&str] = &[
    "args", "data", "files", "form", "headers", "json", "origin", "url",
];
const ANYTHING_KEYS: &[&str] = &[
    "args", "data", "files", "form", "headers", "json", "method", "origin", "url",
];

pub async fn get(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    echo(&state, peer, &parts, GET_KEYS)
}

pub async fn post(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    echo(&state, peer, &parts, ECHO_KEYS)
}

pub async fn put(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    echo(&state, peer, &parts, ECHO_KEYS)
}

pub async fn patch(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    echo(&state, peer, &parts, ECHO_KEYS)
}

pub async fn delete(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    echo(&state, peer, &parts, ECHO_KEYS)
}

pub async fn anything(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    parts: Parts,
) -> Result<Response, ServiceError> {
    echo(&state, peer, &parts, ANYTHING_KEYS)
}

fn echo(
    state: &AppState,
    peer: SocketAddr,
    parts: &Parts,
    keys: &[&str],
) -> Result<Response, ServiceError> {
    let descriptor = descriptor::build(parts, peer, state.secure);
    projection_response(&descriptor, keys)
}

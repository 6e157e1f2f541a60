//! Network layer subsystem.
//!
//! The accept loop itself lives in axum/axum-server; this module only
//! carries the TLS material loading for the secure listener.

pub mod tls;

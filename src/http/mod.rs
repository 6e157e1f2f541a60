//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, routing table)
//!     → handlers (parse parameters, invoke the core)
//!     → inspect/stream subsystems produce the payload
//!     → Send to client
//! ```

pub mod server;

pub use server::{AppState, HttpServer};

//! HTTP request & response testing service library.
//!
//! An httpbin-style server: endpoints echo request metadata back as JSON
//! or simulate specific HTTP behaviors (delays, byte streaming, status
//! codes, caching headers, redirects, range requests).

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod inspect;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod stream;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use http::HttpServer;

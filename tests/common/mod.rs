//! Shared utilities for integration testing.

use std::net::SocketAddr;

use echobin::{HttpServer, ServiceConfig};

/// Boot the service on an ephemeral port and return its address.
pub async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(ServiceConfig::default());
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    addr
}

/// Client that does not follow redirects, so redirect statuses and
/// `Location` headers can be asserted directly.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

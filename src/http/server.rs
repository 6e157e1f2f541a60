//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all endpoint handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind the server to a listener (plain or TLS)
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::handlers::{auth, caching, cookies, dynamic, formats, inspection, methods, redirect, status};
use crate::lifecycle::shutdown_signal;
use crate::observability::metrics;

/// Application state injected into handlers. Read-only after startup;
/// requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Whether the listener presents transport security; drives the
    /// `https` scheme in reconstructed request URLs.
    pub secure: bool,
}

/// HTTP server for the echo service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState {
            secure: config.listener.tls.is_some(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all endpoints and middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            // HTTP method echoes
            .route("/get", routing::get(methods::get))
            .route("/post", routing::post(methods::post))
            .route("/put", routing::put(methods::put))
            .route("/patch", routing::patch(methods::patch))
            .route("/delete", routing::delete(methods::delete))
            .route("/anything", routing::any(methods::anything))
            .route("/anything/{anything}", routing::any(methods::anything))
            // Request inspection
            .route("/headers", routing::get(inspection::headers))
            .route("/ip", routing::get(inspection::ip))
            .route("/user-agent", routing::get(inspection::user_agent))
            // Status codes and redirects
            .route("/status/{codes}", routing::any(status::status_codes))
            .route("/redirect-to", routing::any(redirect::redirect_to))
            // Dynamic data
            .route("/delay/{delay}", routing::any(dynamic::delay))
            .route("/drip", routing::get(dynamic::drip))
            .route("/range/{numbytes}", routing::get(dynamic::range))
            .route("/links/{n}/{offset}", routing::get(dynamic::links))
            .route("/bytes/{n}", routing::get(dynamic::bytes))
            .route("/base64/{value}", routing::get(dynamic::base64_decode))
            // Response inspection
            .route("/cache", routing::get(caching::cache))
            .route("/cache/{value}", routing::get(caching::cache_control))
            .route("/etag/{etag}", routing::get(caching::etag))
            .route("/response-headers", routing::get(caching::response_headers))
            // Auth
            .route("/basic-auth/{user}/{password}", routing::get(auth::basic_auth))
            .route("/bearer", routing::get(auth::bearer))
            // Cookies
            .route("/cookies", routing::get(cookies::cookies))
            .route("/cookies/set", routing::get(cookies::set))
            .route("/cookies/set/{name}/{value}", routing::get(cookies::set_named))
            .route("/cookies/delete", routing::get(cookies::delete))
            // Fixed formats
            .route("/deny", routing::get(formats::deny))
            .route("/robots.txt", routing::get(formats::robots_txt))
            .route("/json", routing::get(formats::json))
            .with_state(state)
            .layer(middleware::from_fn(record_request_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
    ) -> Result<(), std::io::Error> {
        tracing::info!(
            address = %addr,
            "HTTPS server starting"
        );

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown_handle.graceful_shutdown(None);
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(app)
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Record one counter increment and one latency observation per request.
async fn record_request_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, response.status().as_u16(), &path, start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = ServiceConfig::default();
        let state = AppState { secure: false };
        HttpServer::build_router(&config, state)
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 1234))))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_projects_exactly_four_fields() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/get?a=1&a=2")
                    .header("Host", "localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = body_string(response).await;
        assert!(body.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["args", "headers", "origin", "url"]);
        assert_eq!(json["args"]["a"], "1,2");
        assert_eq!(json["url"], "http://localhost:8080/get?a=1&a=2");
    }

    #[tokio::test]
    async fn test_drip_status_and_body_from_query() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/drip?duration=0&numbytes=5&code=304")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(body_string(response).await, "*****");
    }

    #[tokio::test]
    async fn test_status_rejects_non_numeric_candidate() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/status/200,teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_range_unsatisfiable() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/range/5")
                    .header(header::RANGE, "bytes=10-20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(
            response.headers().get(header::CONTENT_RANGE).unwrap(),
            "bytes */5"
        );
    }

    #[tokio::test]
    async fn test_range_partial_content() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/range/10")
                    .header(header::RANGE, "bytes=2-5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(
            response.headers().get(header::CONTENT_RANGE).unwrap(),
            "bytes 2-5/10"
        );
        assert_eq!(body_string(response).await, "cdef");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = test_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

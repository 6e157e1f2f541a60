//! HTTP request & response testing service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                   ECHOBIN                      │
//!                    │                                                │
//!  Client Request    │  ┌─────────┐   ┌──────────┐   ┌────────────┐   │
//!  ──────────────────┼─▶│  http   │──▶│ handlers │──▶│  inspect   │   │
//!                    │  │ server  │   │          │   │ descriptor │   │
//!                    │  └─────────┘   └────┬─────┘   │ projection │   │
//!                    │                     │         └────────────┘   │
//!                    │                     ▼                          │
//!  Client Response   │               ┌──────────┐                     │
//!  ◀─────────────────┼───────────────│  stream  │                     │
//!                    │               │  pacing  │                     │
//!                    │               │  range   │                     │
//!                    │               └──────────┘                     │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns          │  │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐  │  │
//!                    │  │  │ config │ │observability│ │lifecycle│  │  │
//!                    │  │  └────────┘ └─────────────┘ └─────────┘  │  │
//!                    │  └──────────────────────────────────────────┘  │
//!                    └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod inspect;
pub mod stream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod net;
pub mod observability;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use crate::config::{load_config, ServiceConfig};
use crate::http::HttpServer;

#[derive(Parser)]
#[command(name = "echobin")]
#[command(about = "HTTP request & response testing service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(port) = cli.port {
        let mut addr: SocketAddr = config.listener.bind_address.parse()?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    match config.listener.tls.clone() {
        Some(tls) => {
            let rustls = net::tls::load_tls_config(
                std::path::Path::new(&tls.cert_path),
                std::path::Path::new(&tls.key_path),
            )
            .await?;
            let addr: SocketAddr = config.listener.bind_address.parse()?;
            let server = HttpServer::new(config);
            server.run_tls(addr, rustls).await?;
        }
        None => {
            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            let server = HttpServer::new(config);
            server.run(listener).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

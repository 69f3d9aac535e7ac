//! Instrumented Item Service
//!
//! A minimal CRUD backend built with Tokio and Axum: one record type, a
//! Prometheus scrape endpoint, and a telemetry pipeline that times every
//! request.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                  ITEM SERVICE                    │
//!                  │                                                  │
//!  Client Request  │  ┌────────────┐    ┌──────────┐    ┌──────────┐  │
//!  ────────────────┼─▶│ telemetry  │───▶│ handlers │───▶│  store   │  │
//!                  │  │ middleware │    │  (CRUD)  │    │ (items)  │  │
//!                  │  └─────┬──────┘    └──────────┘    └──────────┘  │
//!                  │        │ on completion                           │
//!                  │        ▼                                         │
//!                  │  ┌───────────────────────────────┐               │
//!                  │  │ observability                 │               │
//!                  │  │  histogram (seconds)          │──▶ GET /metrics
//!                  │  │  log line  (milliseconds)     │──▶ stdout
//!                  │  └───────────────────────────────┘               │
//!                  └──────────────────────────────────────────────────┘
//! ```
//!
//! Every route, including `/metrics` and `/health`, passes through the
//! telemetry middleware, which emits exactly one histogram observation and
//! one structured log line per completed request.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use item_service::config::loader::resolve_config;
use item_service::lifecycle::{wait_for_signal, Shutdown};
use item_service::observability::{logging, Telemetry};
use item_service::store;
use item_service::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "item-service", version, about = "Instrumented item CRUD service")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "item-service starting");
    tracing::info!(
        port = config.server.port,
        store_uri = %config.store.uri,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    // Install the metrics recorder before the first request can land.
    let telemetry = Telemetry::init()?;

    // A store that cannot be constructed or reached is not fatal: the
    // process keeps serving and store-backed requests fail individually.
    let store = match store::from_uri(&config.store.uri) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, uri = %config.store.uri, "Store connection failed");
            store::unavailable(&config.store.uri)
        }
    };
    match store.ping().await {
        Ok(()) => tracing::info!("Connected to store"),
        Err(e) => tracing::error!(error = %e, "Store ping failed"),
    }

    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(&config, store, telemetry);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (telemetry, CORS, timeout)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

use crate::config::schema::AppConfig;
use crate::http::handlers;
use crate::http::middleware::telemetry::track_requests;
use crate::observability::Telemetry;
use crate::store::ItemStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub telemetry: Telemetry,
}

/// HTTP server for the item API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &AppConfig, store: Arc<dyn ItemStore>, telemetry: Telemetry) -> Self {
        let state = AppState { store, telemetry };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The telemetry layer is outermost so every route (`/metrics` and
    /// `/health` included) is observed with its final status code, even
    /// when that status comes from the timeout layer or the fallback.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route(
                "/items",
                get(handlers::list_items).post(handlers::create_item),
            )
            .route("/metrics", get(handlers::metrics))
            .route("/health", get(handlers::health))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(CorsLayer::permissive())
            .layer(middleware::from_fn_with_state(state.clone(), track_requests))
            .with_state(state)
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

//! Request Telemetry Middleware.
//! Times every request and reports it on completion.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;

/// Scoped instrumentation around the downstream handler.
///
/// Entry captures the start instant and the request facts; once the
/// handler has produced its response on any exit path, exactly one
/// histogram observation (seconds) and one log line (milliseconds) are
/// emitted, labelled with the final status code. The response itself
/// passes through untouched. If the task is torn down before a response
/// exists (client gone mid-flight), nothing is emitted.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    state
        .telemetry
        .record_request(&method, &path, status, elapsed);

    tracing::info!(
        method = %method,
        path = %path,
        status_code = status,
        duration_ms = elapsed.as_millis() as u64,
        "HTTP {} {}",
        method,
        path
    );

    response
}

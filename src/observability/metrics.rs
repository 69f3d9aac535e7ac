//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_request_duration_seconds` (histogram): latency distribution by
//!   method, route, status_code
//! - `items_created_total` (counter): successful item creations
//! - `process_start_time_seconds` (gauge): process start, unix seconds
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations in the recorder)
//! - Histogram buckets are fixed configuration, applied to the recorder at
//!   install time so the scrape renders true buckets rather than summaries
//! - Series are registered up front so a scrape before the first request
//!   already shows them

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use metrics::Unit;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Histogram of request latency in seconds.
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Counter of successful item creations.
pub const ITEMS_CREATED: &str = "items_created_total";

/// Gauge carrying the process start time in unix seconds.
pub const PROCESS_START_TIME: &str = "process_start_time_seconds";

/// Latency bucket upper bounds in seconds; `+Inf` is implicit.
pub const DURATION_BUCKETS: [f64; 9] = [0.1, 0.3, 0.5, 0.7, 1.0, 3.0, 5.0, 7.0, 10.0];

/// Handle to the process-wide metrics registry.
///
/// Constructed once at startup and passed by handle into the application
/// state. Cloning is cheap; all clones render the same registry.
#[derive(Clone)]
pub struct Telemetry {
    handle: PrometheusHandle,
}

impl Telemetry {
    /// Install the Prometheus recorder and describe the metric families.
    ///
    /// Fails if a recorder is already installed for this process.
    pub fn init() -> Result<Self, BuildError> {
        let handle = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(REQUEST_DURATION.to_string()),
                &DURATION_BUCKETS,
            )?
            .install_recorder()?;

        metrics::describe_histogram!(
            REQUEST_DURATION,
            Unit::Seconds,
            "Duration of HTTP requests in seconds"
        );
        metrics::describe_counter!(ITEMS_CREATED, "Total number of items created");
        metrics::describe_gauge!(
            PROCESS_START_TIME,
            Unit::Seconds,
            "Start time of the process since unix epoch in seconds"
        );

        metrics::counter!(ITEMS_CREATED).absolute(0);
        let start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        metrics::gauge!(PROCESS_START_TIME).set(start.as_secs_f64());

        Ok(Self { handle })
    }

    /// Record one completed request: duration in seconds, labelled by
    /// method, route, and final status code.
    pub fn record_request(&self, method: &str, route: &str, status: u16, elapsed: Duration) {
        metrics::histogram!(
            REQUEST_DURATION,
            "method" => method.to_string(),
            "route" => route.to_string(),
            "status_code" => status.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    /// Count one successful item creation.
    pub fn record_item_created(&self) {
        metrics::counter!(ITEMS_CREATED).increment(1);
    }

    /// Render the text exposition for scrape consumption.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

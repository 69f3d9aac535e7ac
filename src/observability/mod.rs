//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request lifecycle (http::middleware::telemetry) produces:
//!     → logging.rs   (one structured log line per completed request)
//!     → metrics.rs   (duration histogram, creation counter)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON or pretty)
//!     → GET /metrics (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Recorder and subscriber are installed by explicit init calls from
//!   `main`, never as module-load side effects
//! - The `Telemetry` handle is cloned into application state; recording
//!   is atomic aggregation and needs no locking here
//! - The log line and the metric observation are independent consumers of
//!   the same timing fact (milliseconds vs seconds)

pub mod logging;
pub mod metrics;

pub use metrics::Telemetry;

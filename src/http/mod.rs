//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → middleware/telemetry.rs (capture method, path, start instant)
//!     → handlers.rs (CRUD against the store)
//!     → middleware/telemetry.rs (observe histogram, emit log line)
//!     → response to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{AppState, HttpServer};

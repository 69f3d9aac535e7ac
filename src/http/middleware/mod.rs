//! Middleware applied around the route handlers.

pub mod telemetry;

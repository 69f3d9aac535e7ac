//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main):
//!     Load config → init logging + metrics → connect store → bind → serve
//!
//! Shutdown (shutdown.rs):
//!     SIGINT/SIGTERM → Shutdown::trigger → server drains → exit
//! ```

pub mod shutdown;

pub use shutdown::{wait_for_signal, Shutdown};

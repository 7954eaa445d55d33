//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - stderr console output (pretty or JSON)
//! - optional rolling JSON log files
//! - fatal panic hook

pub mod logger;

pub use logger::{install_panic_hook, Logger};

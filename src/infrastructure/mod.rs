//! Infrastructure layer module
//!
//! External integrations and adapters:
//! - Remote task API client (reqwest)
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod tasks_api;

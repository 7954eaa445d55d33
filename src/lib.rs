//! TinyTasks MCP - tool adapter for the TinyTasks API
//!
//! Exposes a remote task-tracking REST service as eight named tools for
//! AI assistants, over stdio JSON-RPC or plain HTTP JSON.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): tool names, remote shapes, errors, ports
//! - **Service Layer** (`services`): tool catalog, dispatch and text rendering
//! - **Infrastructure Layer** (`infrastructure`): HTTP client, config, logging
//! - **Adapter Layer** (`adapters`): stdio and HTTP transports
//! - **CLI Layer** (`cli`): argument parsing and process bootstrap
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tinytasks_mcp::{StdioServer, TasksApiClient, ToolDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TasksApiClient::new("https://tasks.example.com")?;
//!     StdioServer::new(Arc::new(ToolDispatcher::new(client))).run().await
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::mcp::{StdioServer, WebHttpConfig, WebHttpServer};
pub use domain::errors::{DispatchResult, RemoteFailure, ToolError};
pub use domain::models::{Config, ToolDefinition, ToolName, ToolResult, TransportMode};
pub use domain::ports::{ApiRequest, TaskApi};
pub use infrastructure::config::{ConfigError, ConfigLoader, ConfigOverrides};
pub use infrastructure::tasks_api::TasksApiClient;
pub use services::{Catalog, ToolDispatcher};

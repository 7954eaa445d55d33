//! Domain layer for the TinyTasks MCP server
//!
//! Tool and task models, dispatch errors, and the port to the remote API.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DispatchResult, RemoteFailure, ToolError};

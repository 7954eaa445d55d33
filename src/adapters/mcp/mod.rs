//! MCP transport adapters.
//!
//! Two front ends over the same tool dispatcher: JSON-RPC on stdio for
//! desktop clients, and plain JSON over HTTP for web clients.

pub mod jsonrpc;
pub mod stdio_server;
pub mod web_http;

pub use stdio_server::StdioServer;
pub use web_http::{WebHttpConfig, WebHttpServer};

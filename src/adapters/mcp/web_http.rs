//! MCP HTTP server for web clients.
//!
//! Plain JSON endpoints (no JSON-RPC framing):
//! - `GET /` server metadata
//! - `GET /mcp/tools` the tool catalog
//! - `POST /mcp/execute` run a tool, body `{tool, arguments}`
//! - `GET /health` liveness

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::models::{ContentBlock, ToolArguments, ToolDefinition, ToolResult};
use crate::domain::ports::TaskApi;
use crate::services::ToolDispatcher;

/// Configuration for the web HTTP server.
#[derive(Debug, Clone)]
pub struct WebHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
    /// Remote API origin, reported by `GET /`.
    pub api_base: String,
}

impl Default for WebHttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            enable_cors: true,
            api_base: String::new(),
        }
    }
}

/// Body of `POST /mcp/execute`.
#[derive(Debug, Default, Deserialize)]
pub struct ExecuteRequest {
    /// Kept loose so a non-string name fails as an unknown tool, not as bad JSON.
    #[serde(default)]
    pub tool: Option<Value>,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Body returned when a tool invocation fails.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteErrorResponse {
    pub error: String,
    pub content: Vec<ContentBlock>,
    pub is_error: bool,
}

/// Error response for malformed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct ToolsResponse<'a> {
    tools: &'a [ToolDefinition],
}

/// Shared state for the web HTTP server.
struct AppState<A: TaskApi> {
    dispatcher: Arc<ToolDispatcher<A>>,
    api_base: String,
}

/// Web HTTP server.
pub struct WebHttpServer<A: TaskApi + 'static> {
    config: WebHttpConfig,
    dispatcher: Arc<ToolDispatcher<A>>,
}

impl<A: TaskApi + 'static> WebHttpServer<A> {
    pub fn new(dispatcher: Arc<ToolDispatcher<A>>, config: WebHttpConfig) -> Self {
        Self { config, dispatcher }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            dispatcher: Arc::clone(&self.dispatcher),
            api_base: self.config.api_base.clone(),
        });

        let app = Router::new()
            .route("/", get(server_info::<A>))
            .route("/mcp/tools", get(list_tools::<A>))
            .route("/mcp/execute", post(execute_tool::<A>))
            .route("/health", get(health_check))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the server.
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .with_context(|| {
                format!("Failed to bind {}:{}", self.config.host, self.config.port)
            })?;

        info!(
            address = %listener.local_addr()?,
            tools = self.dispatcher.catalog().len(),
            "web HTTP server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;
        Ok(())
    }
}

// Handler functions

async fn server_info<A: TaskApi + 'static>(State(state): State<Arc<AppState<A>>>) -> Json<Value> {
    Json(json!({
        "name": "TinyTasks MCP Server",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "MCP server for the TinyTasks API",
        "endpoints": {
            "tools": "/mcp/tools",
            "execute": "/mcp/execute",
            "health": "/health"
        },
        "api_base": state.api_base,
    }))
}

async fn list_tools<A: TaskApi + 'static>(State(state): State<Arc<AppState<A>>>) -> Response {
    Json(ToolsResponse {
        tools: state.dispatcher.catalog().definitions(),
    })
    .into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// An empty body is treated as `{}` so that it reports the missing tool name.
async fn execute_tool<A: TaskApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    body: Bytes,
) -> Response {
    let request: ExecuteRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ExecuteRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => return bad_request(format!("Invalid JSON body: {e}")),
        }
    };

    let tool = match request.tool {
        None | Some(Value::Null) => return bad_request("Tool name is required"),
        Some(Value::String(name)) if name.is_empty() => {
            return bad_request("Tool name is required")
        }
        Some(Value::String(name)) => name,
        Some(other) => other.to_string(),
    };

    let arguments = match request.arguments {
        None | Some(Value::Null) => ToolArguments::new(),
        Some(Value::Object(map)) => map,
        Some(_) => return bad_request("Tool arguments must be an object"),
    };

    match state.dispatcher.invoke(&tool, &arguments).await {
        Ok(text) => Json(ToolResult::text(text)).into_response(),
        Err(e) => {
            tracing::warn!(tool = %tool, error = %e, "tool execution failed");
            let failure = ToolResult::failure(&tool, &e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExecuteErrorResponse {
                    error: e.to_string(),
                    content: failure.content,
                    is_error: true,
                }),
            )
                .into_response()
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

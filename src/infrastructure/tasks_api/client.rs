//! HTTP client for the remote TinyTasks REST API.
//!
//! Every call is independent: no retries, no local timeout, no caching.
//! A single `reqwest::Client` is shared so connections may be reused.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::errors::{DispatchResult, RemoteFailure, ToolError};
use crate::domain::ports::{ApiRequest, TaskApi};

/// `TaskApi` implementation backed by reqwest.
#[derive(Debug, Clone)]
pub struct TasksApiClient {
    http: Client,
    base_url: String,
}

impl TasksApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// A trailing `/` on the base URL is dropped so request paths can
    /// always start with one.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// JSON content type first, caller headers replace it when they collide.
    fn headers_for(request: &ApiRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &request.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %name, "skipping invalid request header"),
            }
        }

        headers
    }
}

#[async_trait]
impl TaskApi for TasksApiClient {
    async fn send(&self, request: ApiRequest) -> DispatchResult<Value> {
        let endpoint = request.path.clone();
        debug!(method = %request.method, endpoint = %endpoint, "calling task API");

        let mut builder = self
            .http
            .request(request.method.clone(), self.url_for(&request.path))
            .headers(Self::headers_for(&request));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(endpoint = %endpoint, error = %e, "task API request failed");
            ToolError::RemoteRequest {
                endpoint: endpoint.clone(),
                failure: RemoteFailure::Transport(e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint, status = status.as_u16(), "task API returned error status");
            return Err(ToolError::RemoteRequest {
                endpoint,
                failure: RemoteFailure::Status {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                },
            });
        }

        if !request.expect_body {
            return Ok(Value::Null);
        }

        let body = response.text().await.map_err(|e| ToolError::RemoteRequest {
            endpoint: endpoint.clone(),
            failure: RemoteFailure::Transport(e),
        })?;

        serde_json::from_str(&body).map_err(|e| ToolError::MalformedResponse {
            endpoint,
            reason: e.to_string(),
        })
    }
}

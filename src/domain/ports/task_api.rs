use crate::domain::errors::DispatchResult;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// One outbound call against the remote task API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL, including any query string.
    pub path: String,
    /// Extra headers, applied after `Content-Type: application/json`.
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Whether the response body should be parsed as JSON.
    pub expect_body: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
            expect_body: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// PATCH with an optional JSON body.
    pub fn patch(path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            body,
            ..Self::new(Method::PATCH, path)
        }
    }

    /// DELETE whose response body is ignored.
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            expect_body: false,
            ..Self::new(Method::DELETE, path)
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Port for the remote task-tracking service.
///
/// Returns the parsed JSON body, or `Value::Null` when the request was
/// built with `expect_body = false`.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn send(&self, request: ApiRequest) -> DispatchResult<Value>;
}

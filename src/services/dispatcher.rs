//! Tool dispatcher: resolves a tool invocation to exactly one remote call
//! and renders the JSON response as text.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::domain::errors::{DispatchResult, ToolError};
use crate::domain::models::{
    ApiStatus, Priority, StatusFilter, TaskEnvelope, TaskListEnvelope, TaskStatsEnvelope,
    ToolArguments, ToolName, ToolResult,
};
use crate::domain::ports::{ApiRequest, TaskApi};
use crate::services::catalog::Catalog;
use crate::services::format;

/// Owning user attached to every task created through this server.
pub const DEFAULT_USER_ID: &str = "123";

/// A validated tool invocation. One variant per catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    GetApiStatus,
    GetTasksStats,
    ListTasks {
        status: Option<StatusFilter>,
    },
    GetTask {
        id: String,
    },
    CreateTask {
        title: String,
        detail: String,
        priority: Priority,
    },
    /// `changes` is forwarded verbatim as the PATCH body.
    UpdateTask {
        id: String,
        changes: ToolArguments,
    },
    ToggleTask {
        id: String,
    },
    DeleteTask {
        id: String,
    },
}

impl ToolCall {
    /// Validate `args` for `tool`. No remote call is made here.
    pub fn parse(tool: ToolName, args: &ToolArguments) -> DispatchResult<Self> {
        let call = match tool {
            ToolName::GetApiStatus => Self::GetApiStatus,
            ToolName::GetTasksStats => Self::GetTasksStats,
            ToolName::ListTasks => Self::ListTasks {
                status: optional_choice(tool, args, "status", StatusFilter::parse, &StatusFilter::VALUES)?,
            },
            ToolName::GetTask => Self::GetTask {
                id: required_string(tool, args, "id")?,
            },
            ToolName::CreateTask => Self::CreateTask {
                title: required_string(tool, args, "title")?,
                detail: optional_string(tool, args, "detail")?.unwrap_or_default(),
                priority: optional_choice(tool, args, "priority", Priority::parse, &Priority::VALUES)?
                    .unwrap_or_default(),
            },
            ToolName::UpdateTask => {
                let id = required_string(tool, args, "id")?;
                optional_choice(tool, args, "priority", Priority::parse, &Priority::VALUES)?;
                let mut changes = args.clone();
                changes.remove("id");
                Self::UpdateTask { id, changes }
            }
            ToolName::ToggleTask => Self::ToggleTask {
                id: required_string(tool, args, "id")?,
            },
            ToolName::DeleteTask => Self::DeleteTask {
                id: required_string(tool, args, "id")?,
            },
        };
        Ok(call)
    }

    pub fn name(&self) -> ToolName {
        match self {
            Self::GetApiStatus => ToolName::GetApiStatus,
            Self::GetTasksStats => ToolName::GetTasksStats,
            Self::ListTasks { .. } => ToolName::ListTasks,
            Self::GetTask { .. } => ToolName::GetTask,
            Self::CreateTask { .. } => ToolName::CreateTask,
            Self::UpdateTask { .. } => ToolName::UpdateTask,
            Self::ToggleTask { .. } => ToolName::ToggleTask,
            Self::DeleteTask { .. } => ToolName::DeleteTask,
        }
    }

    /// The single remote request this call maps to.
    pub fn request(&self) -> ApiRequest {
        match self {
            Self::GetApiStatus => ApiRequest::get("/tasks/status"),
            Self::GetTasksStats => ApiRequest::get("/tasks/stats"),
            Self::ListTasks { status: None } => ApiRequest::get("/tasks"),
            Self::ListTasks {
                status: Some(status),
            } => ApiRequest::get(format!("/tasks?status={}", status.as_str())),
            Self::GetTask { id } => ApiRequest::get(format!("/tasks/{id}")),
            Self::CreateTask {
                title,
                detail,
                priority,
            } => ApiRequest::post(
                "/tasks",
                json!({
                    "title": title,
                    "detail": detail,
                    "priority": priority.as_str(),
                    "userId": DEFAULT_USER_ID,
                }),
            ),
            Self::UpdateTask { id, changes } => {
                ApiRequest::patch(format!("/tasks/{id}"), Some(Value::Object(changes.clone())))
            }
            Self::ToggleTask { id } => ApiRequest::patch(format!("/tasks/{id}/toggle"), None),
            Self::DeleteTask { id } => ApiRequest::delete(format!("/tasks/{id}")),
        }
    }

    /// Render the remote response for this call.
    pub fn render(&self, endpoint: &str, body: Value) -> DispatchResult<String> {
        let text = match self {
            Self::GetApiStatus => format::render_status(&decode::<ApiStatus>(endpoint, body)?),
            Self::GetTasksStats => {
                format::render_stats(&decode::<TaskStatsEnvelope>(endpoint, body)?.stats)
            }
            Self::ListTasks { .. } => {
                format::render_task_list(&decode::<TaskListEnvelope>(endpoint, body)?)
            }
            Self::GetTask { .. } => format::render_task(&decode::<TaskEnvelope>(endpoint, body)?.task),
            Self::CreateTask { .. } => {
                format::render_created(&decode::<TaskEnvelope>(endpoint, body)?.task)
            }
            Self::UpdateTask { .. } => {
                format::render_updated(&decode::<TaskEnvelope>(endpoint, body)?.task)
            }
            Self::ToggleTask { .. } => {
                format::render_toggled(&decode::<TaskEnvelope>(endpoint, body)?.task)
            }
            Self::DeleteTask { id } => format::render_deleted(id),
        };
        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> DispatchResult<T> {
    serde_json::from_value(body).map_err(|e| ToolError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

fn required_string(tool: ToolName, args: &ToolArguments, key: &str) -> DispatchResult<String> {
    match optional_string(tool, args, key)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ToolError::MissingArgument {
            tool: tool.to_string(),
            argument: key.to_string(),
        }),
    }
}

/// Absent and `null` both mean "not given".
fn optional_string(tool: ToolName, args: &ToolArguments, key: &str) -> DispatchResult<Option<String>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::InvalidArgument {
            tool: tool.to_string(),
            argument: key.to_string(),
            expected: "a string".to_string(),
        }),
    }
}

/// An empty string is treated as "not given".
fn optional_choice<T>(
    tool: ToolName,
    args: &ToolArguments,
    key: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> DispatchResult<Option<T>> {
    let invalid = || ToolError::InvalidArgument {
        tool: tool.to_string(),
        argument: key.to_string(),
        expected: format!("one of {}", allowed.join(", ")),
    };

    match optional_string(tool, args, key).map_err(|_| invalid())? {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => parse(&value).map(Some).ok_or_else(invalid),
    }
}

/// Maps tool invocations onto the remote task API.
///
/// Holds no mutable state; one instance is shared by every concurrent
/// invocation of a transport adapter.
pub struct ToolDispatcher<A: TaskApi> {
    api: A,
    catalog: Catalog,
}

impl<A: TaskApi> ToolDispatcher<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            catalog: Catalog::standard(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run the named tool and return its rendered text.
    ///
    /// Unknown tools and invalid arguments fail before any HTTP call.
    #[instrument(skip(self, args))]
    pub async fn invoke(&self, name: &str, args: &ToolArguments) -> DispatchResult<String> {
        let tool = ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let call = ToolCall::parse(tool, args)?;
        let request = call.request();
        let endpoint = request.path.clone();

        debug!(method = %request.method, endpoint = %endpoint, "dispatching tool call");
        let body = self.api.send(request).await?;
        call.render(&endpoint, body)
    }

    /// Like [`invoke`](Self::invoke), but failures become an error-flagged result.
    pub async fn execute(&self, name: &str, args: &ToolArguments) -> ToolResult {
        match self.invoke(name, args).await {
            Ok(text) => ToolResult::text(text),
            Err(e) => {
                warn!(tool = %name, error = %e, "tool invocation failed");
                ToolResult::failure(name, &e)
            }
        }
    }
}

//! Tool names, definitions, argument enums and invocation results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Argument bag passed with a tool invocation.
pub type ToolArguments = Map<String, Value>;

/// The closed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetApiStatus,
    GetTasksStats,
    ListTasks,
    GetTask,
    CreateTask,
    UpdateTask,
    ToggleTask,
    DeleteTask,
}

impl ToolName {
    /// Every tool, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::GetApiStatus,
        Self::GetTasksStats,
        Self::ListTasks,
        Self::GetTask,
        Self::CreateTask,
        Self::UpdateTask,
        Self::ToggleTask,
        Self::DeleteTask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetApiStatus => "get_api_status",
            Self::GetTasksStats => "get_tasks_stats",
            Self::ListTasks => "list_tasks",
            Self::GetTask => "get_task",
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::ToggleTask => "toggle_task",
            Self::DeleteTask => "delete_task",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == s)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority accepted by `create_task` and `update_task`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const VALUES: [&'static str; 3] = ["low", "medium", "high"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Completion filter for `list_tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Completed,
    Pending,
}

impl StatusFilter {
    pub const VALUES: [&'static str; 2] = ["completed", "pending"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// A tool as advertised to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// A single block of tool output. Only text is produced by this server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// Outcome of one tool invocation, in the shape both transports emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Failed invocation of `tool`, carrying the error text.
    pub fn failure(tool: &str, error: &impl fmt::Display) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: format!("Error executing {tool}: {error}"),
            }],
            is_error: true,
        }
    }

    /// Concatenated text of all content blocks.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|ContentBlock::Text { text }| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

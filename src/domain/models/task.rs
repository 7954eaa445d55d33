//! Task shapes returned by the remote TinyTasks API.
//!
//! These are read-only views; the remote service owns every task and this
//! crate never caches or mutates one outside a single request.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A task as returned by the remote API.
///
/// Every field tolerates `null` or an unexpected scalar so one odd record
/// never fails a whole listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_done: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
}

/// Shown for any field the remote API left empty.
pub const UNKNOWN: &str = "unknown";

impl Task {
    pub fn state_label(&self) -> &'static str {
        if self.is_done {
            "Completed"
        } else {
            "Pending"
        }
    }

    pub fn id_label(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn title_label(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn priority_label(&self) -> &str {
        self.priority.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn user_label(&self) -> &str {
        self.user_id.as_deref().unwrap_or(UNKNOWN)
    }

    /// Detail text, with empty or absent detail shown as `No detail`.
    pub fn detail_or_placeholder(&self) -> &str {
        match self.detail.as_deref() {
            Some(detail) if !detail.is_empty() => detail,
            _ => "No detail",
        }
    }
}

/// `null` is absent; numbers and booleans keep their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Anything but `true` is pending.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// `{ "task": { ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct TaskEnvelope {
    pub task: Task,
}

/// `{ "tasks": [ ... ], "total": n }`
#[derive(Debug, Clone, Deserialize)]
pub struct TaskListEnvelope {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub total: Value,
}

/// Aggregate counters reported by `GET /tasks/stats`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: Value,
    pub completed: Value,
    pub pending: Value,
    #[serde(default)]
    pub completion_rate: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatsEnvelope {
    pub stats: TaskStats,
}

/// Health document reported by `GET /tasks/status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub mode: Value,
    #[serde(default)]
    pub db_status: Value,
    #[serde(default)]
    pub timestamp: Value,
}

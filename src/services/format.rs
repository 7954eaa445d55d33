//! Text rendering of remote API responses.
//!
//! Labels and their order are fixed per tool; clients read these blocks
//! directly so changing them is a user-visible change.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::models::{ApiStatus, Task, TaskListEnvelope, TaskStats};

/// Render a scalar JSON value without quotes around strings.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "unknown".to_string(),
        other => other.to_string(),
    }
}

/// `2025-01-02T03:04:05Z` -> `2025-01-02 03:04:05 UTC`.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map_or_else(
            || "Invalid Date".to_string(),
            |dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        )
}

pub fn render_status(status: &ApiStatus) -> String {
    format!(
        "API status: {}\nMode: {}\nDatabase: {}\nTimestamp: {}",
        scalar(&status.status),
        scalar(&status.mode),
        scalar(&status.db_status),
        scalar(&status.timestamp),
    )
}

pub fn render_stats(stats: &TaskStats) -> String {
    format!(
        "Task statistics:\n- Total: {}\n- Completed: {}\n- Pending: {}\n- Completion rate: {}%",
        scalar(&stats.total),
        scalar(&stats.completed),
        scalar(&stats.pending),
        scalar(&stats.completion_rate),
    )
}

fn render_list_entry(task: &Task) -> String {
    format!(
        "• {} ({}) - {}\n  ID: {}\n  Detail: {}\n  Created: {}",
        task.title_label(),
        task.priority_label(),
        task.state_label(),
        task.id_label(),
        task.detail_or_placeholder(),
        format_timestamp(task.created_at.as_deref()),
    )
}

pub fn render_task_list(list: &TaskListEnvelope) -> String {
    let total = match &list.total {
        Value::Null => list.tasks.len().to_string(),
        other => scalar(other),
    };
    let header = format!("Tasks found: {total}");
    if list.tasks.is_empty() {
        return header;
    }

    let entries = list
        .tasks
        .iter()
        .map(render_list_entry)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{header}\n\n{entries}")
}

pub fn render_task(task: &Task) -> String {
    format!(
        "Task: {}\nID: {}\nStatus: {}\nPriority: {}\nDetail: {}\nUser: {}\nCreated: {}\nUpdated: {}",
        task.title_label(),
        task.id_label(),
        task.state_label(),
        task.priority_label(),
        task.detail_or_placeholder(),
        task.user_label(),
        format_timestamp(task.created_at.as_deref()),
        format_timestamp(task.updated_at.as_deref()),
    )
}

pub fn render_created(task: &Task) -> String {
    format!(
        "✅ Task created successfully:\nTitle: {}\nID: {}\nPriority: {}\nDetail: {}",
        task.title_label(),
        task.id_label(),
        task.priority_label(),
        task.detail_or_placeholder(),
    )
}

pub fn render_updated(task: &Task) -> String {
    format!(
        "✅ Task updated successfully:\nTitle: {}\nID: {}\nStatus: {}\nPriority: {}\nDetail: {}",
        task.title_label(),
        task.id_label(),
        task.state_label(),
        task.priority_label(),
        task.detail_or_placeholder(),
    )
}

pub fn render_toggled(task: &Task) -> String {
    format!(
        "✅ Task status toggled:\nTitle: {}\nNew status: {}\nID: {}",
        task.title_label(),
        task.state_label(),
        task.id_label(),
    )
}

pub fn render_deleted(id: &str) -> String {
    format!("✅ Task deleted successfully (ID: {id})")
}

//! Fixed catalog of the tools this server exposes.

use serde_json::{json, Value};

use crate::domain::models::{Priority, StatusFilter, ToolDefinition, ToolName};

/// Ordered, immutable list of tool definitions shared by both transports.
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: Vec<ToolDefinition>,
}

impl Catalog {
    /// Build the standard catalog, one definition per [`ToolName`] in order.
    pub fn standard() -> Self {
        let definitions = ToolName::ALL
            .into_iter()
            .map(|name| ToolDefinition {
                name: name.as_str().to_string(),
                description: description(name).to_string(),
                input_schema: input_schema(name),
            })
            .collect();
        Self { definitions }
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn description(name: ToolName) -> &'static str {
    match name {
        ToolName::GetApiStatus => "Get the current status of the TinyTasks API",
        ToolName::GetTasksStats => "Get task statistics: total, completed, pending",
        ToolName::ListTasks => "List all tasks with an optional status filter",
        ToolName::GetTask => "Get the details of a specific task",
        ToolName::CreateTask => "Create a new task",
        ToolName::UpdateTask => "Update an existing task",
        ToolName::ToggleTask => "Toggle the completion state of a task",
        ToolName::DeleteTask => "Permanently delete a task",
    }
}

fn id_property(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn input_schema(name: ToolName) -> Value {
    match name {
        ToolName::GetApiStatus | ToolName::GetTasksStats => json!({
            "type": "object",
            "properties": {}
        }),
        ToolName::ListTasks => json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "enum": StatusFilter::VALUES,
                    "description": "Filter by state: completed or pending"
                }
            }
        }),
        ToolName::GetTask => json!({
            "type": "object",
            "properties": { "id": id_property("Unique task ID (UUID)") },
            "required": ["id"]
        }),
        ToolName::CreateTask => json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Task title (required)" },
                "detail": { "type": "string", "description": "Detailed description of the task" },
                "priority": {
                    "type": "string",
                    "enum": Priority::VALUES,
                    "description": "Task priority"
                }
            },
            "required": ["title"]
        }),
        ToolName::UpdateTask => json!({
            "type": "object",
            "properties": {
                "id": id_property("Unique ID of the task to update"),
                "title": { "type": "string", "description": "New task title" },
                "detail": { "type": "string", "description": "New task description" },
                "priority": {
                    "type": "string",
                    "enum": Priority::VALUES,
                    "description": "New task priority"
                },
                "isDone": { "type": "boolean", "description": "Completion state of the task" }
            },
            "required": ["id"]
        }),
        ToolName::ToggleTask => json!({
            "type": "object",
            "properties": { "id": id_property("Unique ID of the task to toggle") },
            "required": ["id"]
        }),
        ToolName::DeleteTask => json!({
            "type": "object",
            "properties": { "id": id_property("Unique ID of the task to delete") },
            "required": ["id"]
        }),
    }
}

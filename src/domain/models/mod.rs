pub mod config;
pub mod task;
pub mod tool;

pub use config::{ApiConfig, Config, LoggingConfig, ServerConfig, TransportMode};
pub use task::{
    ApiStatus, Task, TaskEnvelope, TaskListEnvelope, TaskStats, TaskStatsEnvelope,
};
pub use tool::{
    ContentBlock, Priority, StatusFilter, ToolArguments, ToolDefinition, ToolName, ToolResult,
};

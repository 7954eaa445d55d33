//! Port trait definitions (Hexagonal Architecture)
//!
//! - `TaskApi`: outbound calls to the remote task-tracking service

pub mod task_api;

pub use task_api::{ApiRequest, TaskApi};

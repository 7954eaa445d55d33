pub mod catalog;
pub mod dispatcher;
pub mod format;

pub use catalog::Catalog;
pub use dispatcher::{ToolCall, ToolDispatcher, DEFAULT_USER_ID};

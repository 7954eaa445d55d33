//! Domain errors for tool dispatch and remote task API calls.

use thiserror::Error;

/// Why a call to the remote task API did not succeed.
#[derive(Debug, Error)]
pub enum RemoteFailure {
    /// The API answered with a non-success status code.
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    /// The request never produced a response (DNS, refused connection, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Errors surfaced by the tool dispatcher.
///
/// Adapters never let these escape: the stdio server turns them into an
/// `isError` tool result and the HTTP server into a 500 response.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument '{argument}' for {tool}")]
    MissingArgument { tool: String, argument: String },

    #[error("Invalid value for '{argument}' in {tool}: expected {expected}")]
    InvalidArgument {
        tool: String,
        argument: String,
        expected: String,
    },

    #[error("Error in {endpoint}: {failure}")]
    RemoteRequest {
        endpoint: String,
        #[source]
        failure: RemoteFailure,
    },

    #[error("Error in {endpoint}: malformed response: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

impl ToolError {
    /// HTTP status returned by the remote API, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRequest {
                failure: RemoteFailure::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// True when the error was detected locally, before any HTTP call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool(_) | Self::MissingArgument { .. } | Self::InvalidArgument { .. }
        )
    }
}

pub type DispatchResult<T> = Result<T, ToolError>;

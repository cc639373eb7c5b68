//! Errors produced by tool declarations and handlers.

use thiserror::Error;

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors produced by tool handlers and their collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Call arguments were missing or of the wrong type.
    #[error("invalid arguments: {reason}")]
    InvalidArguments {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The upstream service answered with a non-success status.
    #[error("upstream request failed with status {status}: {message}")]
    Upstream {
        /// HTTP status returned by the upstream service.
        status: u16,
        /// Message describing the failed operation.
        message: String,
    },

    /// The outbound API client could not be constructed.
    #[error("failed to get API client: {reason}")]
    Client {
        /// Human-readable reason returned by the client factory.
        reason: String,
    },

    /// A collaborator required by the handler is not wired in.
    #[error("unavailable: {reason}")]
    Unavailable {
        /// Missing collaborator description.
        reason: String,
    },

    /// The request was understood but refused.
    #[error("rejected: {reason}")]
    Rejected {
        /// Human-readable reason for refusal.
        reason: String,
    },

    /// Tool execution failed.
    #[error("tool execution failed: {reason}")]
    Execution {
        /// Human-readable error returned by the tool implementation.
        reason: String,
    },
}

impl ToolError {
    /// Creates an invalid-arguments error.
    #[must_use]
    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            reason: reason.into(),
        }
    }

    /// Creates an upstream error for the given status.
    #[must_use]
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Creates an execution error from the supplied reason.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }

    /// Returns the upstream status when the error came from the remote service.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

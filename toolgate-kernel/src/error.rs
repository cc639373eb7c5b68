//! Per-call dispatch failures.

use serde_json::{Value, json};
use thiserror::Error;
use toolgate_inventory::InventoryError;
use toolgate_primitives::ScopeSet;
use toolgate_tools::ToolError;

/// Result alias for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors reported back to the caller of a single tool call.
///
/// None of these terminate the process; the dispatcher keeps serving other
/// calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No tool with the given name exists.
    #[error("unknown tool `{name}`")]
    UnknownTool {
        /// Name supplied by the caller.
        name: String,
    },

    /// The tool exists but its toolset is not enabled.
    #[error(
        "tool `{tool}` belongs to toolset `{toolset}`, which is not enabled{}",
        if *dynamic { "; enable it through dynamic toolset discovery" } else { "" }
    )]
    ToolsetNotEnabled {
        /// Requested tool.
        tool: String,
        /// Toolset owning the tool.
        toolset: String,
        /// Whether runtime enablement is available.
        dynamic: bool,
    },

    /// The tool modifies remote state and the gateway runs read-only.
    #[error("tool `{tool}` is not available in read-only mode")]
    ReadOnlyViolation {
        /// Requested tool.
        tool: String,
    },

    /// The caller lacks scopes the tool requires.
    #[error("tool `{tool}` requires scopes the caller does not hold: {missing}")]
    InsufficientScope {
        /// Requested tool.
        tool: String,
        /// Required scopes absent from the caller's grant.
        missing: ScopeSet,
    },

    /// The handler ran and failed.
    #[error("tool `{tool}` failed: {source}")]
    Handler {
        /// Tool whose handler failed.
        tool: String,
        /// Error returned by the handler.
        #[source]
        source: ToolError,
    },

    /// A runtime toolset enable was refused.
    #[error(transparent)]
    Enablement(#[from] InventoryError),

    /// The dispatcher no longer accepts calls.
    #[error("dispatcher is shutting down")]
    ShuttingDown,
}

impl DispatchError {
    /// Stable machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool { .. } => "unknown_tool",
            Self::ToolsetNotEnabled { .. } => "toolset_not_enabled",
            Self::ReadOnlyViolation { .. } => "read_only_violation",
            Self::InsufficientScope { .. } => "insufficient_scope",
            Self::Handler { .. } => "handler_error",
            Self::Enablement(_) => "enablement_error",
            Self::ShuttingDown => "shutting_down",
        }
    }

    /// Returns `true` when the call was refused before its handler ran.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::Handler { .. })
    }

    /// Structured error body for the protocol layer.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut error = json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });

        match self {
            Self::UnknownTool { name } => {
                error["tool"] = Value::from(name.as_str());
            }
            Self::ToolsetNotEnabled { tool, toolset, .. } => {
                error["tool"] = Value::from(tool.as_str());
                error["toolset"] = Value::from(toolset.as_str());
            }
            Self::ReadOnlyViolation { tool } => {
                error["tool"] = Value::from(tool.as_str());
            }
            Self::InsufficientScope { tool, missing } => {
                error["tool"] = Value::from(tool.as_str());
                error["missingScopes"] = Value::from(
                    missing
                        .iter()
                        .map(|scope| scope.as_str().to_owned())
                        .collect::<Vec<_>>(),
                );
            }
            Self::Handler { tool, source } => {
                error["tool"] = Value::from(tool.as_str());
                if let Some(status) = source.upstream_status() {
                    error["upstreamStatus"] = Value::from(status);
                }
            }
            Self::Enablement(_) | Self::ShuttingDown => {}
        }

        json!({ "error": error })
    }
}

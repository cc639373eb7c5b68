//! Per-call context and the live toolset directory exposed to handlers.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use toolgate_primitives::CallId;

use crate::error::{ToolError, ToolResult};

/// Listing entry describing one toolset and its live enablement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsetSummary {
    /// Toolset identifier.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the toolset is part of the default set.
    pub is_default: bool,
    /// Whether the toolset is currently enabled.
    pub enabled: bool,
}

/// Listing entry describing one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the tool only reads remote state.
    pub read_only: bool,
}

/// Live view over the catalog and enablement state.
///
/// Implemented by the dispatch layer and reached by the discovery tools
/// through [`CallContext::directory`].
pub trait ToolsetDirectory: Send + Sync {
    /// Lists every toolset that can be enabled.
    fn toolsets(&self) -> Vec<ToolsetSummary>;

    /// Lists the tools in a toolset.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Rejected`] when the toolset is unknown.
    fn toolset_tools(&self, id: &str) -> ToolResult<Vec<ToolSummary>>;

    /// Enables a toolset for the rest of the process lifetime.
    ///
    /// Returns `false` when it was already enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Rejected`] when dynamic mode is inactive or the
    /// toolset is unknown.
    fn enable_toolset(&self, id: &str) -> ToolResult<bool>;
}

/// Context supplied to a tool handler for one call.
#[derive(Clone)]
pub struct CallContext {
    call_id: CallId,
    directory: Option<Arc<dyn ToolsetDirectory>>,
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("call_id", &self.call_id)
            .field("directory", &self.directory.is_some())
            .finish()
    }
}

impl CallContext {
    /// Creates a context with no directory attached.
    #[must_use]
    pub fn new(call_id: CallId) -> Self {
        Self {
            call_id,
            directory: None,
        }
    }

    /// Attaches the live toolset directory.
    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn ToolsetDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Returns the call identifier.
    #[must_use]
    pub const fn call_id(&self) -> CallId {
        self.call_id
    }

    /// Returns the toolset directory.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Unavailable`] when no directory is attached.
    pub fn directory(&self) -> ToolResult<&Arc<dyn ToolsetDirectory>> {
        self.directory.as_ref().ok_or_else(|| ToolError::Unavailable {
            reason: "toolset directory is not attached to this call".into(),
        })
    }
}

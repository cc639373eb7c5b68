//! Per-toolset enablement state machine.

use toolgate_primitives::ToolsetId;
use tracing::debug;

use crate::error::{InventoryError, InventoryResult};

/// States a toolset can occupy during the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsetState {
    /// Declared in the catalog; enablement not yet resolved.
    Declared,
    /// Not requested at startup.
    Disabled,
    /// Enabled by the startup request.
    EnabledAtStartup,
    /// Enabled at runtime through dynamic discovery.
    EnabledDynamically,
}

impl ToolsetState {
    /// Returns `true` when calls into the toolset may be dispatched.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::EnabledAtStartup | Self::EnabledDynamically)
    }

    /// Applies an event, returning the next state.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidTransition`] when the event is not
    /// allowed from the current state. There is no path back to `Disabled`.
    pub fn transition(self, toolset: &ToolsetId, event: ToolsetEvent) -> InventoryResult<Self> {
        let next = match (self, event) {
            (Self::Declared, ToolsetEvent::Resolve { requested: true }) => Self::EnabledAtStartup,
            (Self::Declared, ToolsetEvent::Resolve { requested: false }) => Self::Disabled,
            (Self::Disabled, ToolsetEvent::EnableDynamically) => Self::EnabledDynamically,
            (from, event) => {
                return Err(InventoryError::InvalidTransition {
                    toolset: toolset.clone(),
                    from,
                    event,
                });
            }
        };

        debug!(%toolset, from = ?self, to = ?next, ?event, "toolset state transition");
        Ok(next)
    }
}

/// Events driving [`ToolsetState`] transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsetEvent {
    /// Startup resolution decided whether the toolset was requested.
    Resolve {
        /// Whether the resolved request contains the toolset.
        requested: bool,
    },
    /// A caller enabled the toolset at runtime.
    EnableDynamically,
}

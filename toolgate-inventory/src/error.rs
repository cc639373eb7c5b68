//! Errors raised while building the inventory and resolving enablement.

use thiserror::Error;
use toolgate_primitives::ToolsetId;

use crate::state::{ToolsetEvent, ToolsetState};

/// Result alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors surfaced by the inventory, resolver, and enablement state.
///
/// The construction variants describe defects in the static declarations
/// and abort startup. `UnknownToolset` is an operator configuration error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Two tools were declared with the same name.
    #[error("tool `{name}` is declared more than once")]
    DuplicateToolName {
        /// Name of the offending tool.
        name: String,
    },

    /// Two toolsets were declared with the same identifier.
    #[error("toolset `{id}` is declared more than once")]
    DuplicateToolsetId {
        /// The duplicated identifier.
        id: String,
    },

    /// A tool references a toolset that was never declared.
    #[error("tool `{tool}` references undeclared toolset `{toolset}`")]
    UnknownToolsetReference {
        /// Name of the tool.
        tool: String,
        /// The missing toolset identifier.
        toolset: String,
    },

    /// A toolset was declared under a request-only keyword.
    #[error("toolset id `{id}` is reserved")]
    ReservedToolsetId {
        /// The reserved identifier.
        id: String,
    },

    /// A declared toolset identifier failed validation.
    #[error("invalid toolset id `{id}`: {reason}")]
    InvalidToolsetId {
        /// The offending identifier.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A declared tool name failed validation.
    #[error("invalid tool name `{name}`: {reason}")]
    InvalidToolName {
        /// The offending name.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// No tool with the given name exists.
    #[error("tool `{name}` is not in the inventory")]
    ToolNotFound {
        /// Name that failed to resolve.
        name: String,
    },

    /// Requested toolsets are not in the inventory.
    #[error("unknown toolsets: {}", ids.join(", "))]
    UnknownToolset {
        /// Every unrecognised identifier, in request order.
        ids: Vec<String>,
    },

    /// A runtime enable was attempted while dynamic mode is off.
    #[error("cannot enable toolset `{id}`: dynamic toolset discovery is not active")]
    DynamicModeInactive {
        /// Toolset the caller tried to enable.
        id: String,
    },

    /// A toolset state transition is not permitted.
    #[error("invalid transition for toolset `{toolset}` from {from:?} via {event:?}")]
    InvalidTransition {
        /// Toolset whose transition failed.
        toolset: ToolsetId,
        /// State prior to the attempted transition.
        from: ToolsetState,
        /// Event that triggered the failure.
        event: ToolsetEvent,
    },
}

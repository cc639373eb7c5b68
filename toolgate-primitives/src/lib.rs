//! Core shared types for the toolgate tool registry.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod scope;

/// Error type and result alias shared across the registry crates.
pub use error::{Error, Result};
/// Toolset identifiers, reserved keywords, and call identifiers.
pub use ids::{CallId, ToolsetId, ToolsetKeyword};
/// Authorization scopes and scope sets.
pub use scope::{Scope, ScopeSet};

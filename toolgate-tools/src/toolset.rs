//! Toolset metadata declarations.

use serde::{Deserialize, Serialize};
use toolgate_primitives::ToolsetId;

/// Immutable declaration of a named group of tools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsetMetadata {
    id: ToolsetId,
    description: String,
    #[serde(default)]
    is_default: bool,
    #[serde(default)]
    icon: String,
}

impl ToolsetMetadata {
    /// Declares a toolset that is not part of the default set.
    #[must_use]
    pub const fn new(id: ToolsetId, description: String, icon: String) -> Self {
        Self {
            id,
            description,
            is_default: false,
            icon,
        }
    }

    /// Marks the toolset as part of the `default` keyword expansion.
    #[must_use]
    pub const fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Returns the toolset identifier.
    #[must_use]
    pub fn id(&self) -> &ToolsetId {
        &self.id
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` when the toolset belongs to the default set.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns the display icon name.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }
}

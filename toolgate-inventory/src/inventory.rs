//! Built, read-only tool catalog.

use std::collections::HashMap;

use toolgate_primitives::{ToolsetId, ToolsetKeyword};
use toolgate_tools::{ToolDescriptor, ToolsetMetadata};

use crate::builder::InventoryBuilder;
use crate::error::{InventoryError, InventoryResult};

/// Immutable catalog of toolsets and tools.
///
/// Built once by [`InventoryBuilder`]; every query is side-effect free and
/// safe to call from many tasks through a shared reference.
#[derive(Debug)]
pub struct Inventory {
    pub(crate) toolsets: Vec<ToolsetMetadata>,
    pub(crate) toolset_index: HashMap<ToolsetId, usize>,
    pub(crate) tools: Vec<ToolDescriptor>,
    pub(crate) tools_by_name: HashMap<String, usize>,
    pub(crate) tools_by_toolset: HashMap<ToolsetId, Vec<usize>>,
}

impl Inventory {
    /// Starts building an inventory.
    #[must_use]
    pub fn builder() -> InventoryBuilder {
        InventoryBuilder::new()
    }

    /// Looks a tool up by name.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ToolNotFound`] when no tool has that name.
    pub fn tool_by_name(&self, name: &str) -> InventoryResult<&ToolDescriptor> {
        self.tools_by_name
            .get(name)
            .map(|&idx| &self.tools[idx])
            .ok_or_else(|| InventoryError::ToolNotFound {
                name: name.to_owned(),
            })
    }

    /// Returns the tools of a toolset in declaration order, or nothing for an
    /// unknown id.
    #[must_use]
    pub fn tools_in_toolset(&self, id: &str) -> Vec<&ToolDescriptor> {
        self.tools_by_toolset
            .get(id)
            .map(|indices| indices.iter().map(|&idx| &self.tools[idx]).collect())
            .unwrap_or_default()
    }

    /// Identifiers of every default toolset, in declaration order.
    #[must_use]
    pub fn default_toolset_ids(&self) -> Vec<&ToolsetId> {
        self.toolsets
            .iter()
            .filter(|toolset| toolset.is_default() && toolset.id().keyword().is_none())
            .map(ToolsetMetadata::id)
            .collect()
    }

    /// Every declared toolset except those named in `exclude`, in
    /// declaration order.
    #[must_use]
    pub fn available_toolsets(&self, exclude: &[&str]) -> Vec<&ToolsetMetadata> {
        self.toolsets
            .iter()
            .filter(|toolset| {
                !toolset
                    .id()
                    .keyword()
                    .is_some_and(ToolsetKeyword::is_directive_only)
            })
            .filter(|toolset| !exclude.contains(&toolset.id().as_str()))
            .collect()
    }

    /// Identifiers the `all` keyword expands to: every declared toolset that
    /// is not a reserved keyword.
    #[must_use]
    pub fn selectable_toolset_ids(&self) -> Vec<&ToolsetId> {
        self.toolsets
            .iter()
            .map(ToolsetMetadata::id)
            .filter(|id| id.keyword().is_none())
            .collect()
    }

    /// Returns the metadata of a toolset.
    #[must_use]
    pub fn toolset(&self, id: &str) -> Option<&ToolsetMetadata> {
        self.toolset_index.get(id).map(|&idx| &self.toolsets[idx])
    }

    /// Returns `true` when a toolset with this id is declared.
    #[must_use]
    pub fn has_toolset(&self, id: &str) -> bool {
        self.toolset_index.contains_key(id)
    }

    /// Every declared toolset, in declaration order.
    #[must_use]
    pub fn toolsets(&self) -> &[ToolsetMetadata] {
        &self.toolsets
    }

    /// Every declared tool, in declaration order.
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}

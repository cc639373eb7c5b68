//! Assembles declarations into a validated [`Inventory`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use toolgate_primitives::{ToolsetId, ToolsetKeyword};
use toolgate_tools::{ToolDescriptor, ToolsetMetadata};
use tracing::debug;

use crate::error::{InventoryError, InventoryResult};
use crate::inventory::Inventory;

/// Collects tool and toolset declarations prior to validation.
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    toolsets: Vec<ToolsetMetadata>,
    tools: Vec<ToolDescriptor>,
}

impl InventoryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends toolset declarations.
    #[must_use]
    pub fn with_toolsets<I>(mut self, toolsets: I) -> Self
    where
        I: IntoIterator<Item = ToolsetMetadata>,
    {
        self.toolsets.extend(toolsets);
        self
    }

    /// Appends tool declarations, preserving order.
    #[must_use]
    pub fn with_tools<I>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = ToolDescriptor>,
    {
        self.tools.extend(tools);
        self
    }

    /// Validates the declarations and produces the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first declaration defect found:
    /// [`InventoryError::ReservedToolsetId`],
    /// [`InventoryError::InvalidToolsetId`],
    /// [`InventoryError::DuplicateToolsetId`],
    /// [`InventoryError::InvalidToolName`],
    /// [`InventoryError::DuplicateToolName`], or
    /// [`InventoryError::UnknownToolsetReference`].
    pub fn build(self) -> InventoryResult<Inventory> {
        let mut toolset_index = HashMap::with_capacity(self.toolsets.len());
        for (idx, toolset) in self.toolsets.iter().enumerate() {
            validate_toolset_id(toolset.id())?;
            match toolset_index.entry(toolset.id().clone()) {
                Entry::Occupied(_) => {
                    return Err(InventoryError::DuplicateToolsetId {
                        id: toolset.id().to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
        }

        let mut tools_by_name = HashMap::with_capacity(self.tools.len());
        let mut tools_by_toolset: HashMap<ToolsetId, Vec<usize>> = HashMap::new();
        for (idx, tool) in self.tools.iter().enumerate() {
            validate_tool_name(tool.name())?;
            match tools_by_name.entry(tool.name().to_owned()) {
                Entry::Occupied(_) => {
                    return Err(InventoryError::DuplicateToolName {
                        name: tool.name().to_owned(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }

            if !toolset_index.contains_key(tool.toolset()) {
                return Err(InventoryError::UnknownToolsetReference {
                    tool: tool.name().to_owned(),
                    toolset: tool.toolset().to_string(),
                });
            }
            tools_by_toolset
                .entry(tool.toolset().clone())
                .or_default()
                .push(idx);
        }

        debug!(
            toolsets = self.toolsets.len(),
            tools = self.tools.len(),
            "inventory built"
        );

        Ok(Inventory {
            toolsets: self.toolsets,
            toolset_index,
            tools: self.tools,
            tools_by_name,
            tools_by_toolset,
        })
    }
}

fn validate_toolset_id(id: &ToolsetId) -> InventoryResult<()> {
    if id.keyword().is_some_and(ToolsetKeyword::is_directive_only) {
        return Err(InventoryError::ReservedToolsetId { id: id.to_string() });
    }

    // Static ids skip validation at declaration time; check them here.
    ToolsetId::new(id.as_str()).map_err(|err| InventoryError::InvalidToolsetId {
        id: id.to_string(),
        reason: err.to_string(),
    })?;
    Ok(())
}

fn validate_tool_name(name: &str) -> InventoryResult<()> {
    if name.is_empty() {
        return Err(InventoryError::InvalidToolName {
            name: String::new(),
            reason: "tool name cannot be empty".into(),
        });
    }
    if !name
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
    {
        return Err(InventoryError::InvalidToolName {
            name: name.into(),
            reason: "tool name must contain lowercase alphanumeric or underscore".into(),
        });
    }
    Ok(())
}

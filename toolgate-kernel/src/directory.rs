//! Live catalog view handed to tool handlers.

use std::sync::Arc;

use toolgate_inventory::{EnablementState, Inventory};
use toolgate_primitives::ToolsetKeyword;
use toolgate_tools::{ToolError, ToolResult, ToolSummary, ToolsetDirectory, ToolsetSummary};

/// [`ToolsetDirectory`] backed by the inventory and enablement state.
#[derive(Debug, Clone)]
pub struct CatalogDirectory {
    inventory: Arc<Inventory>,
    enablement: Arc<EnablementState>,
    read_only: bool,
}

impl CatalogDirectory {
    /// Creates a directory; `read_only` hides tools that modify state.
    #[must_use]
    pub fn new(inventory: Arc<Inventory>, enablement: Arc<EnablementState>, read_only: bool) -> Self {
        Self {
            inventory,
            enablement,
            read_only,
        }
    }
}

impl ToolsetDirectory for CatalogDirectory {
    fn toolsets(&self) -> Vec<ToolsetSummary> {
        let snapshot = self.enablement.snapshot();
        self.inventory
            .available_toolsets(&[ToolsetKeyword::Dynamic.as_str()])
            .into_iter()
            .map(|toolset| ToolsetSummary {
                id: toolset.id().to_string(),
                description: toolset.description().to_owned(),
                is_default: toolset.is_default(),
                enabled: snapshot.contains(toolset.id().as_str()),
            })
            .collect()
    }

    fn toolset_tools(&self, id: &str) -> ToolResult<Vec<ToolSummary>> {
        if !self.inventory.has_toolset(id) {
            return Err(ToolError::rejected(format!("toolset `{id}` does not exist")));
        }

        Ok(self
            .inventory
            .tools_in_toolset(id)
            .into_iter()
            .filter(|tool| !self.read_only || tool.is_read_only())
            .map(|tool| ToolSummary {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                read_only: tool.is_read_only(),
            })
            .collect())
    }

    fn enable_toolset(&self, id: &str) -> ToolResult<bool> {
        self.enablement
            .enable_dynamically(id)
            .map_err(|err| ToolError::rejected(err.to_string()))
    }
}

//! Process-wide enablement state shared by concurrent dispatches.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use toolgate_primitives::{ToolsetId, ToolsetKeyword};
use tracing::{debug, info};

use crate::error::{InventoryError, InventoryResult};
use crate::inventory::Inventory;
use crate::resolver::ResolvedToolsets;
use crate::state::{ToolsetEvent, ToolsetState};

/// Immutable snapshot of which toolsets are enabled.
#[derive(Debug, Clone)]
pub struct EnabledToolsets {
    order: Vec<ToolsetId>,
    states: HashMap<ToolsetId, ToolsetState>,
}

impl EnabledToolsets {
    /// Returns `true` when the toolset is enabled.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.states.get(id).is_some_and(|state| state.is_enabled())
    }

    /// Enabled toolset ids, startup picks first and runtime additions after.
    #[must_use]
    pub fn ids(&self) -> &[ToolsetId] {
        &self.order
    }

    /// Returns the state of a declared toolset.
    #[must_use]
    pub fn state_of(&self, id: &str) -> Option<ToolsetState> {
        self.states.get(id).copied()
    }

    /// Number of enabled toolsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when nothing is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Enabled-toolset state with copy-on-write runtime additions.
///
/// Readers take a snapshot [`Arc`] and never observe a partial update.
/// Writers are serialised by the lock and only ever add toolsets.
#[derive(Debug)]
pub struct EnablementState {
    dynamic: bool,
    snapshot: RwLock<Arc<EnabledToolsets>>,
}

impl EnablementState {
    /// Creates the startup state from a resolved request.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::UnknownToolset`] listing every requested id
    /// that is not declared in `inventory`.
    pub fn from_resolved(inventory: &Inventory, resolved: &ResolvedToolsets) -> InventoryResult<Self> {
        let unknown = resolved.unknown(inventory);
        if !unknown.is_empty() {
            return Err(InventoryError::UnknownToolset {
                ids: unknown.into_iter().map(str::to_owned).collect(),
            });
        }

        let mut states = HashMap::with_capacity(inventory.toolsets().len());
        for toolset in inventory.toolsets() {
            let requested = resolved.contains(toolset.id().as_str());
            let state = ToolsetState::Declared
                .transition(toolset.id(), ToolsetEvent::Resolve { requested })?;
            states.insert(toolset.id().clone(), state);
        }

        let order = resolved
            .ids()
            .iter()
            .filter_map(|id| inventory.toolset(id).map(|toolset| toolset.id().clone()))
            .collect::<Vec<_>>();

        info!(
            toolsets = ?order.iter().map(ToolsetId::as_str).collect::<Vec<_>>(),
            dynamic = resolved.is_dynamic(),
            "toolset enablement resolved"
        );

        Ok(Self {
            dynamic: resolved.is_dynamic(),
            snapshot: RwLock::new(Arc::new(EnabledToolsets { order, states })),
        })
    }

    /// Returns `true` when runtime enablement is permitted.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Returns the current snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Arc<EnabledToolsets> {
        let guard = self.snapshot.read().expect("enablement state poisoned");
        Arc::clone(&guard)
    }

    /// Returns `true` when the toolset is currently enabled.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.snapshot().contains(id)
    }

    /// Returns the current state of a declared toolset.
    #[must_use]
    pub fn state_of(&self, id: &str) -> Option<ToolsetState> {
        self.snapshot().state_of(id)
    }

    /// Enables a toolset for the rest of the process lifetime.
    ///
    /// Returns `Ok(false)` when the toolset was already enabled.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::DynamicModeInactive`] outside dynamic mode and
    /// [`InventoryError::UnknownToolset`] for an undeclared or reserved id.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn enable_dynamically(&self, id: &str) -> InventoryResult<bool> {
        if !self.dynamic {
            return Err(InventoryError::DynamicModeInactive { id: id.to_owned() });
        }
        if ToolsetKeyword::parse(id).is_some_and(ToolsetKeyword::is_directive_only) {
            return Err(InventoryError::UnknownToolset {
                ids: vec![id.to_owned()],
            });
        }

        let mut guard = self.snapshot.write().expect("enablement state poisoned");
        let Some((toolset, state)) = guard.states.get_key_value(id) else {
            return Err(InventoryError::UnknownToolset {
                ids: vec![id.to_owned()],
            });
        };
        if state.is_enabled() {
            debug!(toolset = id, "toolset already enabled");
            return Ok(false);
        }

        let toolset = toolset.clone();
        let next_state = state.transition(&toolset, ToolsetEvent::EnableDynamically)?;

        let mut next = EnabledToolsets::clone(&guard);
        next.states.insert(toolset.clone(), next_state);
        next.order.push(toolset);
        *guard = Arc::new(next);

        info!(toolset = id, "toolset enabled dynamically");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use toolgate_tools::ToolsetMetadata;

    use crate::resolver::resolve_toolsets;

    fn toolset(id: &'static str, is_default: bool) -> ToolsetMetadata {
        ToolsetMetadata::new(ToolsetId::from_static(id), String::new(), String::new())
            .with_default(is_default)
    }

    fn inventory() -> Inventory {
        Inventory::builder()
            .with_toolsets([
                toolset("context", true),
                toolset("repos", true),
                toolset("actions", false),
                toolset("gists", false),
                toolset("notifications", false),
                toolset("dynamic", false),
            ])
            .build()
            .unwrap()
    }

    fn state(request: &[&str]) -> InventoryResult<EnablementState> {
        let inventory = inventory();
        let resolved = resolve_toolsets(request.iter().copied(), &inventory);
        EnablementState::from_resolved(&inventory, &resolved)
    }

    #[test]
    fn unknown_toolsets_are_rejected_together() {
        let err = state(&["repos", "repoz", "gist"]).expect_err("unknown ids should fail");
        assert_eq!(
            err,
            InventoryError::UnknownToolset {
                ids: vec!["repoz".into(), "gist".into()]
            }
        );
    }

    #[test]
    fn startup_states_are_assigned() {
        let state = state(&["default", "actions"]).unwrap();
        assert!(!state.is_dynamic());
        assert!(state.is_enabled("actions"));
        assert!(state.is_enabled("context"));
        assert!(!state.is_enabled("gists"));
        assert_eq!(state.state_of("repos"), Some(ToolsetState::EnabledAtStartup));
        assert_eq!(state.state_of("gists"), Some(ToolsetState::Disabled));
        assert_eq!(state.state_of("nope"), None);

        let snapshot = state.snapshot();
        let ids: Vec<_> = snapshot.ids().iter().map(ToolsetId::as_str).collect();
        assert_eq!(ids, ["actions", "context", "repos"]);
    }

    #[test]
    fn runtime_enable_requires_dynamic_mode() {
        let state = state(&["default"]).unwrap();
        let err = state.enable_dynamically("gists").unwrap_err();
        assert_eq!(err, InventoryError::DynamicModeInactive { id: "gists".into() });
        assert!(!state.is_enabled("gists"));
    }

    #[test]
    fn runtime_enable_adds_once() {
        let state = state(&["dynamic"]).unwrap();
        assert!(state.is_dynamic());

        let before = state.snapshot();
        assert!(state.enable_dynamically("gists").unwrap());
        assert!(!state.enable_dynamically("gists").unwrap());
        assert!(!state.enable_dynamically("dynamic").unwrap());

        assert!(!before.contains("gists"));
        assert!(state.is_enabled("gists"));
        assert_eq!(state.state_of("gists"), Some(ToolsetState::EnabledDynamically));

        for bad in ["nope", "all", "default"] {
            assert!(matches!(
                state.enable_dynamically(bad),
                Err(InventoryError::UnknownToolset { .. })
            ));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_enables_are_not_lost() {
        let state = Arc::new(state(&["dynamic"]).unwrap());

        let handles: Vec<_> = ["actions", "gists", "notifications", "repos"]
            .into_iter()
            .map(|id| {
                let state = Arc::clone(&state);
                tokio::spawn(async move { state.enable_dynamically(id) })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        let snapshot = state.snapshot();
        for id in ["dynamic", "actions", "gists", "notifications", "repos"] {
            assert!(snapshot.contains(id), "{id} should be enabled");
        }
        assert_eq!(snapshot.len(), 5);
    }
}

//! Startup wiring from configuration to a running dispatcher.

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use toolgate_config::GatewayConfig;
use toolgate_inventory::{EnablementState, Inventory, ResolvedToolsets, resolve_toolsets};
use toolgate_kernel::{
    CompositeDispatchObserver, DispatchObserver, DispatchResult, Dispatcher, DispatcherConfig,
    ToolCall, TracingDispatchObserver,
};
use toolgate_tools::{ToolDependencies, ToolDescriptor};
use tracing::info;

/// A configured gateway: resolved toolsets plus the dispatcher serving them.
pub struct Gateway {
    config: GatewayConfig,
    resolved: ResolvedToolsets,
    dispatcher: Dispatcher,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .field("resolved", &self.resolved)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl Gateway {
    /// Builds a gateway over the bundled GitHub-style catalog.
    ///
    /// # Errors
    ///
    /// Fails when the catalog is inconsistent or the configured toolset
    /// request names unknown toolsets.
    #[cfg(feature = "catalog")]
    pub fn with_catalog(
        config: GatewayConfig,
        translator: &toolgate_tools::Translator,
        deps: Arc<ToolDependencies>,
    ) -> anyhow::Result<Self> {
        let inventory =
            toolgate_catalog::new_inventory(translator).context("failed to build tool inventory")?;
        Self::from_inventory(config, inventory, deps)
    }

    /// Builds a gateway over an arbitrary inventory.
    ///
    /// Dispatch outcomes are logged through [`TracingDispatchObserver`].
    ///
    /// # Errors
    ///
    /// Fails when the configured toolset request names toolsets missing from
    /// `inventory`.
    pub fn from_inventory(
        config: GatewayConfig,
        inventory: Inventory,
        deps: Arc<ToolDependencies>,
    ) -> anyhow::Result<Self> {
        Self::build(config, inventory, deps, Arc::new(TracingDispatchObserver))
    }

    /// Like [`Gateway::from_inventory`]; `observer` receives every report
    /// after the tracing observer.
    ///
    /// # Errors
    ///
    /// Fails when the configured toolset request names toolsets missing from
    /// `inventory`.
    pub fn from_inventory_with_observer(
        config: GatewayConfig,
        inventory: Inventory,
        deps: Arc<ToolDependencies>,
        observer: Arc<dyn DispatchObserver>,
    ) -> anyhow::Result<Self> {
        let observers: [Arc<dyn DispatchObserver>; 2] = [Arc::new(TracingDispatchObserver), observer];
        Self::build(
            config,
            inventory,
            deps,
            Arc::new(CompositeDispatchObserver::new(observers)),
        )
    }

    fn build(
        config: GatewayConfig,
        inventory: Inventory,
        deps: Arc<ToolDependencies>,
        observer: Arc<dyn DispatchObserver>,
    ) -> anyhow::Result<Self> {
        let inventory = Arc::new(inventory);
        let resolved = resolve_toolsets(config.toolset_request(), &inventory);
        let enablement = EnablementState::from_resolved(&inventory, &resolved)
            .context("invalid toolset selection")?;

        let dispatcher_config = DispatcherConfig::new(
            config.read_only,
            DispatcherConfig::default().max_in_flight(),
        );
        let dispatcher =
            Dispatcher::with_config(inventory, Arc::new(enablement), deps, dispatcher_config)
                .with_observer(observer);

        info!(
            tools = dispatcher.enabled_tools().len(),
            read_only = config.read_only,
            dynamic = resolved.is_dynamic(),
            "gateway ready"
        );

        Ok(Self {
            config,
            resolved,
            dispatcher,
        })
    }

    /// Returns the configuration the gateway was built from.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the startup resolution of the toolset request.
    #[must_use]
    pub fn resolved(&self) -> &ResolvedToolsets {
        &self.resolved
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Tools currently reachable by callers.
    #[must_use]
    pub fn enabled_tools(&self) -> Vec<&ToolDescriptor> {
        self.dispatcher.enabled_tools()
    }

    /// Dispatches one call.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub async fn dispatch(&self, call: ToolCall) -> DispatchResult<Value> {
        self.dispatcher.dispatch(call).await
    }
}

//! Call dispatch: lookup, enablement, read-only and scope checks, then the
//! handler.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use toolgate_inventory::{EnablementState, Inventory};
use toolgate_primitives::{CallId, ScopeSet};
use toolgate_tools::{Arguments, CallContext, ToolDependencies, ToolDescriptor, ToolsetDirectory};
use tracing::{Instrument, debug, info_span};

use crate::directory::CatalogDirectory;
use crate::error::{DispatchError, DispatchResult};
use crate::observer::{DispatchObserver, DispatchReport};

/// One inbound tool call.
#[derive(Debug, Clone)]
pub struct ToolCall {
    call_id: CallId,
    name: String,
    arguments: Arguments,
    granted_scopes: ScopeSet,
}

impl ToolCall {
    /// Creates a call with no granted scopes.
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            call_id: CallId::random(),
            name: name.into(),
            arguments,
            granted_scopes: ScopeSet::new(),
        }
    }

    /// Sets the scopes held by the caller.
    #[must_use]
    pub fn with_granted_scopes(mut self, scopes: ScopeSet) -> Self {
        self.granted_scopes = scopes;
        self
    }

    /// Overrides the generated call identifier.
    #[must_use]
    pub fn with_call_id(mut self, call_id: CallId) -> Self {
        self.call_id = call_id;
        self
    }

    /// Returns the call identifier.
    #[must_use]
    pub const fn call_id(&self) -> CallId {
        self.call_id
    }

    /// Returns the requested tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the call arguments.
    #[must_use]
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Returns the caller's granted scopes.
    #[must_use]
    pub fn granted_scopes(&self) -> &ScopeSet {
        &self.granted_scopes
    }
}

/// Dispatcher tuning.
#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    read_only: bool,
    max_in_flight: NonZeroUsize,
}

impl DispatcherConfig {
    /// Creates a configuration.
    #[must_use]
    pub const fn new(read_only: bool, max_in_flight: NonZeroUsize) -> Self {
        Self {
            read_only,
            max_in_flight,
        }
    }

    /// Returns `true` when tools that modify state are refused.
    #[must_use]
    pub const fn read_only(self) -> bool {
        self.read_only
    }

    /// Upper bound on calls running concurrently through [`Dispatcher::spawn`].
    #[must_use]
    pub const fn max_in_flight(self) -> NonZeroUsize {
        self.max_in_flight
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            max_in_flight: NonZeroUsize::new(64).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Routes tool calls to their handlers.
///
/// Cheap to clone; clones share the inventory, enablement state, and
/// in-flight limit.
#[derive(Clone)]
pub struct Dispatcher {
    inventory: Arc<Inventory>,
    enablement: Arc<EnablementState>,
    deps: Arc<ToolDependencies>,
    directory: Arc<dyn ToolsetDirectory>,
    observer: Option<Arc<dyn DispatchObserver>>,
    config: DispatcherConfig,
    permits: Arc<Semaphore>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tools", &self.inventory.tools().len())
            .field("dynamic", &self.enablement.is_dynamic())
            .field("config", &self.config)
            .field("observer_configured", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with the default configuration.
    #[must_use]
    pub fn new(
        inventory: Arc<Inventory>,
        enablement: Arc<EnablementState>,
        deps: Arc<ToolDependencies>,
    ) -> Self {
        Self::with_config(inventory, enablement, deps, DispatcherConfig::default())
    }

    /// Creates a dispatcher with an explicit configuration.
    #[must_use]
    pub fn with_config(
        inventory: Arc<Inventory>,
        enablement: Arc<EnablementState>,
        deps: Arc<ToolDependencies>,
        config: DispatcherConfig,
    ) -> Self {
        let directory: Arc<dyn ToolsetDirectory> = Arc::new(CatalogDirectory::new(
            Arc::clone(&inventory),
            Arc::clone(&enablement),
            config.read_only(),
        ));
        Self {
            inventory,
            enablement,
            deps,
            directory,
            observer: None,
            config,
            permits: Arc::new(Semaphore::new(config.max_in_flight().get())),
        }
    }

    /// Installs an observer, returning the updated dispatcher for chaining.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Returns the inventory.
    #[must_use]
    pub fn inventory(&self) -> &Arc<Inventory> {
        &self.inventory
    }

    /// Returns the enablement state.
    #[must_use]
    pub fn enablement(&self) -> &Arc<EnablementState> {
        &self.enablement
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> DispatcherConfig {
        self.config
    }

    /// Tools a caller can currently reach, in declaration order.
    #[must_use]
    pub fn enabled_tools(&self) -> Vec<&ToolDescriptor> {
        let snapshot = self.enablement.snapshot();
        self.inventory
            .tools()
            .iter()
            .filter(|tool| snapshot.contains(tool.toolset().as_str()))
            .filter(|tool| !self.config.read_only() || tool.is_read_only())
            .collect()
    }

    /// Enables a toolset at runtime.
    ///
    /// Returns `false` when it was already enabled.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Enablement`] when dynamic mode is inactive or
    /// the toolset is unknown.
    pub fn enable_toolset(&self, id: &str) -> DispatchResult<bool> {
        Ok(self.enablement.enable_dynamically(id)?)
    }

    /// Checks whether `call` may run, returning the tool to invoke.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownTool`],
    /// [`DispatchError::ToolsetNotEnabled`],
    /// [`DispatchError::ReadOnlyViolation`], or
    /// [`DispatchError::InsufficientScope`], checked in that order.
    pub fn authorize(&self, call: &ToolCall) -> DispatchResult<&ToolDescriptor> {
        let tool = self
            .inventory
            .tool_by_name(call.name())
            .map_err(|_| DispatchError::UnknownTool {
                name: call.name().to_owned(),
            })?;

        if !self.enablement.is_enabled(tool.toolset().as_str()) {
            return Err(DispatchError::ToolsetNotEnabled {
                tool: tool.name().to_owned(),
                toolset: tool.toolset().to_string(),
                dynamic: self.enablement.is_dynamic(),
            });
        }

        if self.config.read_only() && !tool.is_read_only() {
            return Err(DispatchError::ReadOnlyViolation {
                tool: tool.name().to_owned(),
            });
        }

        let missing = tool.required_scopes().missing_from(call.granted_scopes());
        if !missing.is_empty() {
            return Err(DispatchError::InsufficientScope {
                tool: tool.name().to_owned(),
                missing,
            });
        }

        Ok(tool)
    }

    /// Dispatches a call on the current task.
    ///
    /// # Errors
    ///
    /// Returns any rejection from [`Dispatcher::authorize`] without running
    /// the handler, or [`DispatchError::Handler`] wrapping the handler's
    /// own failure.
    pub async fn dispatch(&self, call: ToolCall) -> DispatchResult<Value> {
        let started = Instant::now();
        let call_id = call.call_id();
        let span = info_span!("tool_call", %call_id, tool = call.name());

        let result = self.run(call).instrument(span).await;
        if let Some(observer) = &self.observer {
            observer.on_dispatch(&DispatchReport {
                call_id,
                tool: match &result {
                    Ok((name, _)) | Err((name, _)) => name,
                },
                elapsed: started.elapsed(),
                error: result.as_ref().err().map(|(_, err)| err),
            });
        }

        result.map(|(_, value)| value).map_err(|(_, err)| err)
    }

    async fn run(&self, call: ToolCall) -> Result<(String, Value), (String, DispatchError)> {
        let tool = match self.authorize(&call) {
            Ok(tool) => tool,
            Err(err) => return Err((call.name, err)),
        };

        debug!(toolset = %tool.toolset(), "invoking tool handler");
        let ctx = CallContext::new(call.call_id).with_directory(Arc::clone(&self.directory));

        match tool
            .invoke(ctx, Arc::clone(&self.deps), call.arguments)
            .await
        {
            Ok(value) => Ok((call.name, value)),
            Err(source) => Err((
                call.name.clone(),
                DispatchError::Handler {
                    tool: call.name,
                    source,
                },
            )),
        }
    }

    /// Dispatches a call on its own task, bounded by the in-flight limit.
    ///
    /// The returned handle resolves to [`DispatchError::ShuttingDown`] when
    /// [`Dispatcher::close`] ran before a slot became free.
    #[must_use]
    pub fn spawn(&self, call: ToolCall) -> JoinHandle<DispatchResult<Value>> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let Ok(_permit) = Arc::clone(&dispatcher.permits).acquire_owned().await else {
                return Err(DispatchError::ShuttingDown);
            };
            dispatcher.dispatch(call).await
        })
    }

    /// Stops admitting calls through [`Dispatcher::spawn`].
    pub fn close(&self) {
        self.permits.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use toolgate_inventory::{EnablementState, resolve_toolsets};
    use toolgate_primitives::{Scope, ToolsetId};
    use toolgate_tools::{ToolAnnotations, ToolError, ToolResult, ToolsetMetadata};

    const ADMIN_ORG: Scope = Scope::from_static("admin:org");

    #[derive(Default)]
    struct Counters {
        audit_log: AtomicUsize,
        dispatch_workflow: AtomicUsize,
    }

    #[derive(Default)]
    struct RecordingObserver {
        kinds: Mutex<Vec<Option<&'static str>>>,
        call_ids: Mutex<Vec<CallId>>,
    }

    impl DispatchObserver for RecordingObserver {
        fn on_dispatch(&self, report: &DispatchReport<'_>) {
            self.call_ids.lock().unwrap().push(report.call_id);
            self.kinds
                .lock()
                .unwrap()
                .push(report.error.map(DispatchError::kind));
        }
    }

    fn toolset(id: &'static str, is_default: bool) -> ToolsetMetadata {
        ToolsetMetadata::new(ToolsetId::from_static(id), format!("{id} tools"), id.into())
            .with_default(is_default)
    }

    async fn list_gists(
        _ctx: CallContext,
        _deps: Arc<ToolDependencies>,
        _args: Arguments,
    ) -> ToolResult<Value> {
        Ok(json!([]))
    }

    async fn broken(
        _ctx: CallContext,
        _deps: Arc<ToolDependencies>,
        _args: Arguments,
    ) -> ToolResult<Value> {
        Err(ToolError::upstream(500, "failed to list notifications"))
    }

    async fn enable(
        ctx: CallContext,
        _deps: Arc<ToolDependencies>,
        args: Arguments,
    ) -> ToolResult<Value> {
        let id = toolgate_tools::args::required_str(&args, "toolset")?;
        let changed = ctx.directory()?.enable_toolset(&id)?;
        Ok(json!({ "enabled": changed }))
    }

    fn inventory(counters: &Arc<Counters>) -> Inventory {
        let orgs = toolset("orgs", true);
        let actions = toolset("actions", false);
        let gists = toolset("gists", false);
        let notifications = toolset("notifications", true);
        let dynamic = toolset("dynamic", false);

        let audit = Arc::clone(counters);
        let workflow = Arc::clone(counters);

        Inventory::builder()
            .with_tools([
                ToolDescriptor::new(
                    &orgs,
                    "get_org_audit_log",
                    move |_ctx: CallContext, _deps: Arc<ToolDependencies>, _args: Arguments| {
                        let audit = Arc::clone(&audit);
                        async move {
                            audit.audit_log.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, ToolError>(json!({ "entries": [] }))
                        }
                    },
                )
                .with_annotations(ToolAnnotations::read_only("Get Organization Audit Log"))
                .with_required_scopes([ADMIN_ORG]),
                ToolDescriptor::new(
                    &actions,
                    "run_workflow",
                    move |_ctx: CallContext, _deps: Arc<ToolDependencies>, _args: Arguments| {
                        let workflow = Arc::clone(&workflow);
                        async move {
                            workflow.dispatch_workflow.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, ToolError>(json!({ "status": "queued" }))
                        }
                    },
                )
                .with_annotations(ToolAnnotations::write("Run workflow")),
                ToolDescriptor::new(&gists, "list_gists", list_gists)
                    .with_annotations(ToolAnnotations::read_only("List gists")),
                ToolDescriptor::new(&notifications, "list_notifications", broken)
                    .with_annotations(ToolAnnotations::read_only("List notifications")),
                ToolDescriptor::new(&dynamic, "enable_toolset", enable)
                    .with_annotations(ToolAnnotations::write("Enable a toolset")),
            ])
            .with_toolsets([orgs, actions, gists, notifications, dynamic])
            .build()
            .unwrap()
    }

    fn dispatcher(request: &[&str], config: DispatcherConfig) -> (Dispatcher, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let inventory = Arc::new(inventory(&counters));
        let resolved = resolve_toolsets(request.iter().copied(), &inventory);
        let enablement = Arc::new(EnablementState::from_resolved(&inventory, &resolved).unwrap());
        let dispatcher = Dispatcher::with_config(
            inventory,
            enablement,
            Arc::new(ToolDependencies::unconfigured()),
            config,
        );
        (dispatcher, counters)
    }

    fn admin() -> ScopeSet {
        [ADMIN_ORG].into_iter().collect()
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let (dispatcher, _) = dispatcher(&["default"], DispatcherConfig::default());
        let err = dispatcher
            .dispatch(ToolCall::new("drop_database", Arguments::new()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownTool {
                name: "drop_database".into()
            }
        );
    }

    #[tokio::test]
    async fn disabled_toolset_never_runs_handler() {
        let (dispatcher, counters) = dispatcher(&["default"], DispatcherConfig::default());
        let err = dispatcher
            .dispatch(ToolCall::new("run_workflow", Arguments::new()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::ToolsetNotEnabled {
                tool: "run_workflow".into(),
                toolset: "actions".into(),
                dynamic: false,
            }
        );
        assert_eq!(counters.dispatch_workflow.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_scope_never_runs_handler() {
        let (dispatcher, counters) = dispatcher(&["default"], DispatcherConfig::default());
        let err = dispatcher
            .dispatch(
                ToolCall::new("get_org_audit_log", Arguments::new())
                    .with_granted_scopes([Scope::from_static("repo")].into_iter().collect()),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::InsufficientScope {
                tool: "get_org_audit_log".into(),
                missing: admin(),
            }
        );
        assert_eq!(counters.audit_log.load(Ordering::SeqCst), 0);

        let output = dispatcher
            .dispatch(ToolCall::new("get_org_audit_log", Arguments::new()).with_granted_scopes(admin()))
            .await
            .unwrap();
        assert_eq!(output, json!({ "entries": [] }));
        assert_eq!(counters.audit_log.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn read_only_mode_blocks_write_tools() {
        let config = DispatcherConfig::new(true, NonZeroUsize::new(4).unwrap());
        let (dispatcher, counters) = dispatcher(&["all"], config);

        let err = dispatcher
            .dispatch(ToolCall::new("run_workflow", Arguments::new()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::ReadOnlyViolation {
                tool: "run_workflow".into()
            }
        );
        assert_eq!(counters.dispatch_workflow.load(Ordering::SeqCst), 0);

        let names: Vec<_> = dispatcher
            .enabled_tools()
            .into_iter()
            .map(ToolDescriptor::name)
            .collect();
        assert_eq!(names, ["get_org_audit_log", "list_gists", "list_notifications"]);
    }

    #[tokio::test]
    async fn handler_errors_are_wrapped_with_tool_name() {
        let (dispatcher, _) = dispatcher(&["default"], DispatcherConfig::default());
        let err = dispatcher
            .dispatch(ToolCall::new("list_notifications", Arguments::new()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::Handler {
                tool: "list_notifications".into(),
                source: ToolError::upstream(500, "failed to list notifications"),
            }
        );
    }

    #[tokio::test]
    async fn dynamic_mode_enables_on_request_only() {
        let (dispatcher, _) = dispatcher(&["dynamic"], DispatcherConfig::default());

        let err = dispatcher
            .dispatch(ToolCall::new("list_gists", Arguments::new()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ToolsetNotEnabled { dynamic: true, .. }
        ));

        let mut args = Arguments::new();
        args.insert("toolset".into(), Value::from("gists"));
        let output = dispatcher
            .dispatch(ToolCall::new("enable_toolset", args))
            .await
            .unwrap();
        assert_eq!(output, json!({ "enabled": true }));

        assert_eq!(
            dispatcher
                .dispatch(ToolCall::new("list_gists", Arguments::new()))
                .await
                .unwrap(),
            json!([])
        );
    }

    #[tokio::test]
    async fn enable_requires_dynamic_mode() {
        let (dispatcher, _) = dispatcher(&["default"], DispatcherConfig::default());
        let err = dispatcher.enable_toolset("gists").unwrap_err();
        assert!(matches!(err, DispatchError::Enablement(_)));
        assert_eq!(err.kind(), "enablement_error");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_dynamic_enables_union() {
        let (dispatcher, _) = dispatcher(&["dynamic"], DispatcherConfig::default());

        let calls = ["gists", "actions"].map(|id| {
            let mut args = Arguments::new();
            args.insert("toolset".into(), Value::from(id));
            dispatcher.spawn(ToolCall::new("enable_toolset", args))
        });

        for outcome in futures::future::join_all(calls).await {
            assert_eq!(outcome.unwrap().unwrap(), json!({ "enabled": true }));
        }

        let snapshot = dispatcher.enablement().snapshot();
        assert!(snapshot.contains("gists"));
        assert!(snapshot.contains("actions"));
        assert!(snapshot.contains("dynamic"));
    }

    #[tokio::test]
    async fn observer_sees_every_outcome() {
        let observer = Arc::new(RecordingObserver::default());
        let (dispatcher, _) = dispatcher(&["default"], DispatcherConfig::default());
        let dispatcher = dispatcher.with_observer(observer.clone());

        let _ = dispatcher
            .dispatch(ToolCall::new("missing", Arguments::new()))
            .await;
        let call_id = CallId::random();
        let _ = dispatcher
            .dispatch(
                ToolCall::new("get_org_audit_log", Arguments::new())
                    .with_granted_scopes(admin())
                    .with_call_id(call_id),
            )
            .await;

        assert_eq!(
            *observer.kinds.lock().unwrap(),
            [Some("unknown_tool"), None]
        );
        assert_eq!(observer.call_ids.lock().unwrap()[1], call_id);
    }

    #[tokio::test]
    async fn closed_dispatcher_refuses_spawned_calls() {
        let (dispatcher, _) = dispatcher(&["default"], DispatcherConfig::default());
        dispatcher.close();

        let outcome = dispatcher
            .spawn(ToolCall::new("list_notifications", Arguments::new()))
            .await
            .unwrap();
        assert_eq!(outcome.unwrap_err(), DispatchError::ShuttingDown);
    }
}

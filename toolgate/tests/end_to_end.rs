use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use toolgate::Gateway;
use toolgate::config::{GatewayConfig, parse_toolset_list};
use toolgate::inventory::{Inventory, InventoryError, ToolsetState};
use toolgate::kernel::{DispatchError, DispatchObserver, DispatchReport, ToolCall};
use toolgate::primitives::{CallId, Scope, ScopeSet, ToolsetId};
use toolgate::tools::translate::passthrough;
use toolgate::tools::{
    ApiClient, ApiRequest, Arguments, CallContext, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolError, ToolResult, ToolsetMetadata,
};

static ACTIONS_CALLS: AtomicUsize = AtomicUsize::new(0);

fn toolset(id: &'static str, is_default: bool) -> ToolsetMetadata {
    ToolsetMetadata::new(ToolsetId::from_static(id), format!("{id} tools"), id.into())
        .with_default(is_default)
}

async fn get_me(
    _ctx: CallContext,
    _deps: Arc<ToolDependencies>,
    _args: Arguments,
) -> ToolResult<Value> {
    Ok(json!({ "login": "octocat" }))
}

async fn get_file_contents(
    _ctx: CallContext,
    _deps: Arc<ToolDependencies>,
    _args: Arguments,
) -> ToolResult<Value> {
    Ok(json!({ "content": "" }))
}

async fn list_workflows(
    _ctx: CallContext,
    _deps: Arc<ToolDependencies>,
    _args: Arguments,
) -> ToolResult<Value> {
    ACTIONS_CALLS.fetch_add(1, Ordering::SeqCst);
    Ok(json!({ "total_count": 0, "workflows": [] }))
}

fn small_inventory() -> Inventory {
    let context = toolset("context", true);
    let repos = toolset("repos", true);
    let actions = toolset("actions", false);

    Inventory::builder()
        .with_tools([
            ToolDescriptor::new(&context, "get_me", get_me)
                .with_annotations(ToolAnnotations::read_only("Get my user profile")),
            ToolDescriptor::new(&repos, "get_file_contents", get_file_contents)
                .with_annotations(ToolAnnotations::read_only("Get file contents")),
            ToolDescriptor::new(&actions, "list_workflows", list_workflows)
                .with_annotations(ToolAnnotations::read_only("List workflows")),
        ])
        .with_toolsets([context, repos, actions])
        .build()
        .unwrap()
}

fn config(toolsets: &str) -> GatewayConfig {
    GatewayConfig {
        toolsets: parse_toolset_list(toolsets),
        ..GatewayConfig::default()
    }
}

fn enabled_ids(gateway: &Gateway) -> BTreeSet<String> {
    gateway
        .dispatcher()
        .enablement()
        .snapshot()
        .ids()
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect()
}

#[tokio::test]
async fn default_plus_explicit_toolset() {
    let before = ACTIONS_CALLS.load(Ordering::SeqCst);

    let defaults_only = Gateway::from_inventory(
        config(""),
        small_inventory(),
        Arc::new(ToolDependencies::unconfigured()),
    )
    .unwrap();
    assert_eq!(defaults_only.resolved().ids(), ["context", "repos"]);

    let err = defaults_only
        .dispatch(ToolCall::new("list_workflows", Arguments::new()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::ToolsetNotEnabled {
            tool: "list_workflows".into(),
            toolset: "actions".into(),
            dynamic: false,
        }
    );
    assert_eq!(ACTIONS_CALLS.load(Ordering::SeqCst), before);

    let gateway = Gateway::from_inventory(
        config("default,actions"),
        small_inventory(),
        Arc::new(ToolDependencies::unconfigured()),
    )
    .unwrap();
    assert_eq!(
        enabled_ids(&gateway),
        BTreeSet::from(["context".to_owned(), "repos".to_owned(), "actions".to_owned()])
    );

    let output = gateway
        .dispatch(ToolCall::new("list_workflows", Arguments::new()))
        .await
        .unwrap();
    assert_eq!(output, json!({ "total_count": 0, "workflows": [] }));
    assert_eq!(ACTIONS_CALLS.load(Ordering::SeqCst), before + 1);
}

#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<(CallId, String, Option<&'static str>)>>,
}

impl DispatchObserver for CallLog {
    fn on_dispatch(&self, report: &DispatchReport<'_>) {
        self.calls.lock().unwrap().push((
            report.call_id,
            report.tool.to_owned(),
            report.error.map(DispatchError::kind),
        ));
    }
}

#[tokio::test]
async fn caller_observer_sees_correlated_calls() {
    let log = Arc::new(CallLog::default());
    let gateway = Gateway::from_inventory_with_observer(
        config(""),
        small_inventory(),
        Arc::new(ToolDependencies::unconfigured()),
        log.clone(),
    )
    .unwrap();

    let call_id = CallId::random();
    gateway
        .dispatch(ToolCall::new("get_me", Arguments::new()).with_call_id(call_id))
        .await
        .unwrap();
    gateway
        .dispatch(ToolCall::new("list_workflows", Arguments::new()))
        .await
        .unwrap_err();

    let calls = log.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], (call_id, "get_me".to_owned(), None));
    assert_eq!(calls[1].1, "list_workflows");
    assert_eq!(calls[1].2, Some("toolset_not_enabled"));
}

#[test]
fn unknown_toolsets_abort_startup() {
    let err = Gateway::from_inventory(
        config("repos,nope,actions,missing"),
        small_inventory(),
        Arc::new(ToolDependencies::unconfigured()),
    )
    .unwrap_err();

    let cause = err.downcast_ref::<InventoryError>().unwrap();
    assert_eq!(
        cause,
        &InventoryError::UnknownToolset {
            ids: vec!["nope".into(), "missing".into()],
        }
    );
}

#[derive(Default)]
struct FakeGitHub {
    requests: Mutex<Vec<String>>,
}

#[async_trait]
impl ApiClient for FakeGitHub {
    async fn send(&self, request: ApiRequest) -> ToolResult<Value> {
        self.requests.lock().unwrap().push(request.path().to_owned());
        match request.path() {
            "/gists" => Ok(json!([{ "id": "aa5a315d61ae9438b18d" }])),
            "/orgs/octo-org/audit-log" => Ok(json!([])),
            _ => Err(ToolError::upstream(404, "Not Found")),
        }
    }
}

fn args(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn dynamic_discovery_over_catalog() {
    let client = Arc::new(FakeGitHub::default());
    let gateway = Gateway::with_catalog(
        GatewayConfig {
            dynamic_toolsets: true,
            ..GatewayConfig::default()
        },
        &passthrough,
        Arc::new(ToolDependencies::with_client(client.clone())),
    )
    .unwrap();
    assert!(gateway.resolved().is_dynamic());

    let listing = gateway
        .dispatch(ToolCall::new("list_available_toolsets", Arguments::new()))
        .await
        .unwrap();
    let gists = listing
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["id"] == "gists")
        .unwrap();
    assert_eq!(gists["enabled"], false);
    assert!(
        !listing
            .as_array()
            .unwrap()
            .iter()
            .any(|entry| entry["id"] == "dynamic")
    );

    let tools = gateway
        .dispatch(ToolCall::new(
            "get_toolset_tools",
            args(json!({ "toolset": "gists" })),
        ))
        .await
        .unwrap();
    assert!(
        tools
            .as_array()
            .unwrap()
            .iter()
            .any(|tool| tool["name"] == "list_gists")
    );

    let err = gateway
        .dispatch(ToolCall::new("list_gists", Arguments::new()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::ToolsetNotEnabled { dynamic: true, .. }
    ));
    assert!(client.requests.lock().unwrap().is_empty());

    let enabled = gateway
        .dispatch(ToolCall::new(
            "enable_toolset",
            args(json!({ "toolset": "gists" })),
        ))
        .await
        .unwrap();
    assert_eq!(enabled["changed"], true);
    assert_eq!(
        gateway.dispatcher().enablement().state_of("gists"),
        Some(ToolsetState::EnabledDynamically)
    );

    let again = gateway
        .dispatch(ToolCall::new(
            "enable_toolset",
            args(json!({ "toolset": "gists" })),
        ))
        .await
        .unwrap();
    assert_eq!(again["changed"], false);

    let output = gateway
        .dispatch(ToolCall::new("list_gists", Arguments::new()))
        .await
        .unwrap();
    assert_eq!(output, json!([{ "id": "aa5a315d61ae9438b18d" }]));
    assert_eq!(*client.requests.lock().unwrap(), ["/gists"]);

    let err = gateway
        .dispatch(ToolCall::new(
            "enable_toolset",
            args(json!({ "toolset": "nope" })),
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Handler {
            source: ToolError::Rejected { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn scopes_and_read_only_mode_over_catalog() {
    let client = Arc::new(FakeGitHub::default());
    let gateway = Gateway::with_catalog(
        GatewayConfig {
            toolsets: vec!["all".into()],
            read_only: true,
            ..GatewayConfig::default()
        },
        &passthrough,
        Arc::new(ToolDependencies::with_client(client.clone())),
    )
    .unwrap();

    let err = gateway
        .dispatch(ToolCall::new(
            "run_workflow",
            args(json!({ "owner": "octo", "repo": "hello", "workflow_id": "ci.yml", "ref": "main" })),
        ))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::ReadOnlyViolation {
            tool: "run_workflow".into()
        }
    );
    assert!(
        gateway
            .enabled_tools()
            .iter()
            .all(|tool| tool.is_read_only())
    );

    let audit = ToolCall::new("get_org_audit_log", args(json!({ "org": "octo-org" })));
    let err = gateway.dispatch(audit.clone()).await.unwrap_err();
    assert_eq!(err.to_payload()["error"]["missingScopes"], json!(["admin:org"]));
    assert!(client.requests.lock().unwrap().is_empty());

    let granted: ScopeSet = [Scope::new("admin:org").unwrap()].into_iter().collect();
    let output = gateway
        .dispatch(audit.with_granted_scopes(granted))
        .await
        .unwrap();
    assert_eq!(output, json!([]));
    assert_eq!(*client.requests.lock().unwrap(), ["/orgs/octo-org/audit-log"]);
}

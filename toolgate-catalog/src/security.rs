//! Code scanning, secret scanning, Dependabot, and advisory tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str, required_u64};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_path, repo_schema, send};
use crate::scopes::{REPO, SECURITY_EVENTS};
use crate::toolsets;

fn alert_number_schema() -> Value {
    repo_schema(
        json!({ "alertNumber": { "type": "number", "description": "The number of the alert." } }),
        &["alertNumber"],
    )
}

fn alert_list_schema(states: &[&str]) -> Value {
    with_cursor_pagination(repo_schema(
        json!({
            "state": {
                "type": "string",
                "description": "Filter alerts by state.",
                "enum": states,
            },
        }),
        &[],
    ))
}

async fn get_alert(deps: &ToolDependencies, args: &Arguments, kind: &str) -> ToolResult<Value> {
    let repo = repo_path(args)?;
    let number = required_u64(args, "alertNumber")?;
    send(
        deps,
        ApiRequest::get(format!("{repo}/{kind}/alerts/{number}")),
        "failed to get alert",
    )
    .await
}

async fn list_alerts(deps: &ToolDependencies, args: &Arguments, kind: &str) -> ToolResult<Value> {
    let repo = repo_path(args)?;
    let pagination = CursorPagination::from_args(args)?;
    let request = ApiRequest::get(format!("{repo}/{kind}/alerts"))
        .with_optional_query("state", optional_str(args, "state")?)
        .with_pagination(&pagination);
    send(deps, request, "failed to list alerts").await
}

pub(crate) fn get_code_scanning_alert(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::code_security(),
        "get_code_scanning_alert",
        get_code_scanning_alert_handler,
    )
    .with_description(t(
        "TOOL_GET_CODE_SCANNING_ALERT_DESCRIPTION",
        "Get details of a specific code scanning alert in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_CODE_SCANNING_ALERT_USER_TITLE",
        "Get code scanning alert",
    )))
    .with_input_schema(alert_number_schema())
    .with_required_scopes([SECURITY_EVENTS])
}

async fn get_code_scanning_alert_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    get_alert(&deps, &args, "code-scanning").await
}

pub(crate) fn list_code_scanning_alerts(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::code_security(),
        "list_code_scanning_alerts",
        list_code_scanning_alerts_handler,
    )
    .with_description(t(
        "TOOL_LIST_CODE_SCANNING_ALERTS_DESCRIPTION",
        "List code scanning alerts in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_CODE_SCANNING_ALERTS_USER_TITLE",
        "List code scanning alerts",
    )))
    .with_input_schema(alert_list_schema(&["open", "closed", "dismissed", "fixed"]))
    .with_required_scopes([SECURITY_EVENTS])
}

async fn list_code_scanning_alerts_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    list_alerts(&deps, &args, "code-scanning").await
}

pub(crate) fn get_secret_scanning_alert(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::secret_protection(),
        "get_secret_scanning_alert",
        get_secret_scanning_alert_handler,
    )
    .with_description(t(
        "TOOL_GET_SECRET_SCANNING_ALERT_DESCRIPTION",
        "Get details of a specific secret scanning alert in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_SECRET_SCANNING_ALERT_USER_TITLE",
        "Get secret scanning alert",
    )))
    .with_input_schema(alert_number_schema())
    .with_required_scopes([REPO])
}

async fn get_secret_scanning_alert_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    get_alert(&deps, &args, "secret-scanning").await
}

pub(crate) fn list_secret_scanning_alerts(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::secret_protection(),
        "list_secret_scanning_alerts",
        list_secret_scanning_alerts_handler,
    )
    .with_description(t(
        "TOOL_LIST_SECRET_SCANNING_ALERTS_DESCRIPTION",
        "List secret scanning alerts in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_SECRET_SCANNING_ALERTS_USER_TITLE",
        "List secret scanning alerts",
    )))
    .with_input_schema(alert_list_schema(&["open", "resolved"]))
    .with_required_scopes([REPO])
}

async fn list_secret_scanning_alerts_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    list_alerts(&deps, &args, "secret-scanning").await
}

pub(crate) fn get_dependabot_alert(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::dependabot(),
        "get_dependabot_alert",
        get_dependabot_alert_handler,
    )
    .with_description(t(
        "TOOL_GET_DEPENDABOT_ALERT_DESCRIPTION",
        "Get details of a specific dependabot alert in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_DEPENDABOT_ALERT_USER_TITLE",
        "Get dependabot alert",
    )))
    .with_input_schema(alert_number_schema())
    .with_required_scopes([SECURITY_EVENTS])
}

async fn get_dependabot_alert_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    get_alert(&deps, &args, "dependabot").await
}

pub(crate) fn list_dependabot_alerts(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::dependabot(),
        "list_dependabot_alerts",
        list_dependabot_alerts_handler,
    )
    .with_description(t(
        "TOOL_LIST_DEPENDABOT_ALERTS_DESCRIPTION",
        "List dependabot alerts in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_DEPENDABOT_ALERTS_USER_TITLE",
        "List dependabot alerts",
    )))
    .with_input_schema(alert_list_schema(&[
        "open",
        "fixed",
        "dismissed",
        "auto_dismissed",
    ]))
    .with_required_scopes([SECURITY_EVENTS])
}

async fn list_dependabot_alerts_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    list_alerts(&deps, &args, "dependabot").await
}

pub(crate) fn list_global_security_advisories(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::security_advisories(),
        "list_global_security_advisories",
        list_global_security_advisories_handler,
    )
    .with_description(t(
        "TOOL_LIST_GLOBAL_SECURITY_ADVISORIES_DESCRIPTION",
        "List global security advisories from GitHub.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_GLOBAL_SECURITY_ADVISORIES_USER_TITLE",
        "List global security advisories",
    )))
    .with_input_schema(with_cursor_pagination(json!({
        "type": "object",
        "properties": {
            "ecosystem": {
                "type": "string",
                "description": "Filter by package ecosystem.",
                "enum": ["actions", "composer", "erlang", "go", "maven", "npm", "nuget", "other", "pip", "pub", "rubygems", "rust"],
            },
            "severity": {
                "type": "string",
                "description": "Filter by severity.",
                "enum": ["unknown", "low", "medium", "high", "critical"],
            },
            "ghsaId": { "type": "string", "description": "Filter by GitHub Security Advisory ID (format: GHSA-xxxx-xxxx-xxxx)." },
        },
    })))
}

async fn list_global_security_advisories_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get("/advisories")
        .with_optional_query("ecosystem", optional_str(&args, "ecosystem")?)
        .with_optional_query("severity", optional_str(&args, "severity")?)
        .with_optional_query("ghsa_id", optional_str(&args, "ghsaId")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list global security advisories").await
}

pub(crate) fn get_global_security_advisory(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::security_advisories(),
        "get_global_security_advisory",
        get_global_security_advisory_handler,
    )
    .with_description(t(
        "TOOL_GET_GLOBAL_SECURITY_ADVISORY_DESCRIPTION",
        "Get a global security advisory",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_GLOBAL_SECURITY_ADVISORY_USER_TITLE",
        "Get a global security advisory",
    )))
    .with_input_schema(json!({
        "type": "object",
        "properties": {
            "ghsaId": { "type": "string", "description": "GitHub Security Advisory ID (format: GHSA-xxxx-xxxx-xxxx)." },
        },
        "required": ["ghsaId"],
    }))
}

async fn get_global_security_advisory_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let id = required_str(&args, "ghsaId")?;
    send(
        &deps,
        ApiRequest::get(format!("/advisories/{id}")),
        "failed to get advisory",
    )
    .await
}

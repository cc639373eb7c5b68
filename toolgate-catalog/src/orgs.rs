//! Organization tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::send;
use crate::scopes::ADMIN_ORG;
use crate::toolsets;

pub(crate) fn search_orgs(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::orgs(), "search_orgs", search_orgs_handler)
        .with_description(t(
            "TOOL_SEARCH_ORGS_DESCRIPTION",
            "Find GitHub organizations by name, location, or other organization metadata. Ideal for discovering companies, open source foundations, or teams.",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_SEARCH_ORGS_USER_TITLE",
            "Search organizations",
        )))
        .with_input_schema(with_cursor_pagination(json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Organization search query. Examples: 'microsoft', 'location:california', 'created:>=2025-01-01'.",
                },
            },
            "required": ["query"],
        })))
}

async fn search_orgs_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let query = required_str(&args, "query")?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get("/search/users")
        .with_query("q", format!("type:org {query}"))
        .with_pagination(&pagination);
    send(&deps, request, "failed to search organizations").await
}

pub(crate) fn get_org_audit_log(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::orgs(),
        "get_org_audit_log",
        get_org_audit_log_handler,
    )
    .with_description(t(
        "TOOL_GET_ORG_AUDIT_LOG_DESCRIPTION",
        "Get audit log for a GitHub organization",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_ORG_AUDIT_LOG_USER_TITLE",
        "Get Organization Audit Log",
    )))
    .with_input_schema(with_cursor_pagination(json!({
        "type": "object",
        "properties": {
            "org": {
                "type": "string",
                "description": "The organization name. The name is not case sensitive.",
            },
            "phrase": {
                "type": "string",
                "description": "A search phrase. Examples: 'created:>2025-01-01', 'action:repo.create', 'country:US', 'repo:my-repo', 'operation:access', 'actor:octocat'. Search phrase cannot be text only, it must be used with filters.",
            },
            "include": {
                "type": "string",
                "description": "Events to include. Default value is 'all'.",
                "enum": ["web", "git", "all"],
            },
            "order": {
                "type": "string",
                "description": "The order of audit log events. Default value is 'desc'.",
                "enum": ["asc", "desc"],
            },
        },
        "required": ["org"],
    })))
    .with_required_scopes([ADMIN_ORG])
}

async fn get_org_audit_log_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let org = required_str(&args, "org")?;
    let phrase = optional_str(&args, "phrase")?;
    let include = optional_str(&args, "include")?;
    let order = optional_str(&args, "order")?;
    let pagination = CursorPagination::from_args(&args)?;

    let request = ApiRequest::get(format!("/orgs/{org}/audit-log"))
        .with_optional_query("phrase", phrase)
        .with_optional_query("include", include)
        .with_optional_query("order", order)
        .with_pagination(&pagination);
    send(&deps, request, "failed to get organization audit log").await
}

//! Issue tools.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use toolgate_tools::args::{optional_str, required_str, required_u64};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, Method, ToolAnnotations,
    ToolDependencies, ToolDescriptor, ToolError, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_path, repo_schema, send};
use crate::scopes::REPO;
use crate::toolsets;

pub(crate) fn issue_read(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::issues(), "issue_read", issue_read_handler)
        .with_description(t(
            "TOOL_ISSUE_READ_DESCRIPTION",
            "Get information about a specific issue in a GitHub repository.",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_ISSUE_READ_USER_TITLE",
            "Get issue details",
        )))
        .with_input_schema(repo_schema(
            json!({
                "method": {
                    "type": "string",
                    "description": "The read operation to perform on a single issue.",
                    "enum": ["get", "get_comments", "get_labels"],
                },
                "issue_number": { "type": "number", "description": "The number of the issue" },
            }),
            &["method", "issue_number"],
        ))
        .with_required_scopes([REPO])
}

async fn issue_read_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let number = required_u64(&args, "issue_number")?;
    let method = required_str(&args, "method")?;

    let (path, failure) = match method.as_str() {
        "get" => (format!("{repo}/issues/{number}"), "failed to get issue"),
        "get_comments" => (
            format!("{repo}/issues/{number}/comments"),
            "failed to get issue comments",
        ),
        "get_labels" => (
            format!("{repo}/issues/{number}/labels"),
            "failed to get issue labels",
        ),
        other => {
            return Err(ToolError::invalid_arguments(format!(
                "unknown method: {other}"
            )));
        }
    };
    send(&deps, ApiRequest::get(path), failure).await
}

pub(crate) fn list_issues(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::issues(), "list_issues", list_issues_handler)
        .with_description(t(
            "TOOL_LIST_ISSUES_DESCRIPTION",
            "List issues in a GitHub repository. For pagination, use the 'endCursor' from the previous response's 'pageInfo' in the 'after' parameter.",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_ISSUES_USER_TITLE",
            "List issues",
        )))
        .with_input_schema(with_cursor_pagination(repo_schema(
            json!({
                "state": {
                    "type": "string",
                    "description": "Filter by state, by default both open and closed issues are returned when not provided",
                    "enum": ["open", "closed", "all"],
                },
                "labels": {
                    "type": "string",
                    "description": "Comma separated label names to filter by",
                },
                "since": {
                    "type": "string",
                    "description": "Filter by date (ISO 8601 timestamp)",
                },
            }),
            &[],
        )))
        .with_required_scopes([REPO])
}

async fn list_issues_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    let state = optional_str(&args, "state")?.unwrap_or_else(|| "all".to_owned());

    let request = ApiRequest::get(format!("{repo}/issues"))
        .with_query("state", state)
        .with_optional_query("labels", optional_str(&args, "labels")?)
        .with_optional_query("since", optional_str(&args, "since")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list issues").await
}

pub(crate) fn search_issues(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::issues(), "search_issues", search_issues_handler)
        .with_description(t(
            "TOOL_SEARCH_ISSUES_DESCRIPTION",
            "Search for issues in GitHub repositories using issues search syntax already scoped to is:issue",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_SEARCH_ISSUES_USER_TITLE",
            "Search issues",
        )))
        .with_input_schema(with_cursor_pagination(json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query using GitHub issues search syntax" },
                "owner": { "type": "string", "description": "Optional repository owner" },
                "repo": { "type": "string", "description": "Optional repository name" },
            },
            "required": ["query"],
        })))
}

async fn search_issues_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let query = required_str(&args, "query")?;
    let mut terms = vec!["is:issue".to_owned()];
    if let (Some(owner), Some(repo)) = (optional_str(&args, "owner")?, optional_str(&args, "repo")?) {
        terms.push(format!("repo:{owner}/{repo}"));
    }
    terms.push(query);

    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get("/search/issues")
        .with_query("q", terms.join(" "))
        .with_pagination(&pagination);
    send(&deps, request, "failed to search issues").await
}

pub(crate) fn issue_write(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::issues(), "issue_write", issue_write_handler)
        .with_description(t(
            "TOOL_ISSUE_WRITE_DESCRIPTION",
            "Create a new or update an existing issue in a GitHub repository.",
        ))
        .with_annotations(ToolAnnotations::write(t(
            "TOOL_ISSUE_WRITE_USER_TITLE",
            "Create or update issue.",
        )))
        .with_input_schema(repo_schema(
            json!({
                "method": {
                    "type": "string",
                    "description": "Write operation to perform on a single issue.",
                    "enum": ["create", "update"],
                },
                "issue_number": { "type": "number", "description": "Issue number to update" },
                "title": { "type": "string", "description": "Issue title" },
                "body": { "type": "string", "description": "Issue body content" },
                "state": {
                    "type": "string",
                    "description": "New state",
                    "enum": ["open", "closed"],
                },
            }),
            &["method"],
        ))
        .with_required_scopes([REPO])
}

async fn issue_write_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let method = required_str(&args, "method")?;

    let mut body = Map::new();
    for key in ["title", "body", "state"] {
        if let Some(value) = optional_str(&args, key)? {
            body.insert(key.to_owned(), Value::from(value));
        }
    }

    match method.as_str() {
        "create" => {
            required_str(&args, "title")?;
            send(
                &deps,
                ApiRequest::post(format!("{repo}/issues"), Value::Object(body)),
                "failed to create issue",
            )
            .await
        }
        "update" => {
            let number = required_u64(&args, "issue_number")?;
            send(
                &deps,
                ApiRequest::new(Method::Patch, format!("{repo}/issues/{number}"))
                    .with_body(Value::Object(body)),
                "failed to update issue",
            )
            .await
        }
        other => Err(ToolError::invalid_arguments(format!(
            "unknown method: {other}"
        ))),
    }
}

pub(crate) fn add_issue_comment(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::issues(),
        "add_issue_comment",
        add_issue_comment_handler,
    )
    .with_description(t(
        "TOOL_ADD_ISSUE_COMMENT_DESCRIPTION",
        "Add a comment to a specific issue in a GitHub repository. Use this tool to add comments to pull requests as well.",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_ADD_ISSUE_COMMENT_USER_TITLE",
        "Add comment to issue",
    )))
    .with_input_schema(repo_schema(
        json!({
            "issue_number": { "type": "number", "description": "Issue number to comment on" },
            "body": { "type": "string", "description": "Comment content" },
        }),
        &["issue_number", "body"],
    ))
    .with_required_scopes([REPO])
}

async fn add_issue_comment_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let number = required_u64(&args, "issue_number")?;
    let body = required_str(&args, "body")?;
    send(
        &deps,
        ApiRequest::post(
            format!("{repo}/issues/{number}/comments"),
            json!({ "body": body }),
        ),
        "failed to create comment",
    )
    .await
}

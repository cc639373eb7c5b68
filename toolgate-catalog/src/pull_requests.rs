//! Pull request tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_bool, optional_str, required_str, required_u64};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, Method, ToolAnnotations,
    ToolDependencies, ToolDescriptor, ToolError, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_path, repo_schema, send};
use crate::scopes::REPO;
use crate::toolsets;

pub(crate) fn pull_request_read(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::pull_requests(),
        "pull_request_read",
        pull_request_read_handler,
    )
    .with_description(t(
        "TOOL_PULL_REQUEST_READ_DESCRIPTION",
        "Get information on a specific pull request in GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_PULL_REQUEST_USER_TITLE",
        "Get details for a single pull request",
    )))
    .with_input_schema(repo_schema(
        json!({
            "method": {
                "type": "string",
                "description": "Action to specify what pull request data needs to be retrieved from GitHub.",
                "enum": ["get", "get_diff", "get_status", "get_files", "get_review_comments", "get_reviews", "get_comments"],
            },
            "pullNumber": { "type": "number", "description": "Pull request number" },
        }),
        &["method", "pullNumber"],
    ))
    .with_required_scopes([REPO])
}

async fn pull_request_read_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let number = required_u64(&args, "pullNumber")?;
    let method = required_str(&args, "method")?;
    let pull = format!("{repo}/pulls/{number}");

    let request = match method.as_str() {
        "get" => ApiRequest::get(pull),
        "get_diff" => ApiRequest::get(pull).with_query("format", "diff"),
        "get_files" => ApiRequest::get(format!("{pull}/files")),
        "get_review_comments" => ApiRequest::get(format!("{pull}/comments")),
        "get_reviews" => ApiRequest::get(format!("{pull}/reviews")),
        "get_comments" => ApiRequest::get(format!("{repo}/issues/{number}/comments")),
        "get_status" => {
            let pr = send(&deps, ApiRequest::get(pull), "failed to get pull request").await?;
            let sha = pr["head"]["sha"]
                .as_str()
                .ok_or_else(|| ToolError::execution("pull request has no head sha"))?;
            ApiRequest::get(format!("{repo}/commits/{sha}/status"))
        }
        other => {
            return Err(ToolError::invalid_arguments(format!(
                "unknown method: {other}"
            )));
        }
    };
    send(&deps, request, "failed to read pull request").await
}

pub(crate) fn list_pull_requests(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::pull_requests(),
        "list_pull_requests",
        list_pull_requests_handler,
    )
    .with_description(t(
        "TOOL_LIST_PULL_REQUESTS_DESCRIPTION",
        "List pull requests in a GitHub repository. If the user specifies an author, then DO NOT use this tool and use the search_pull_requests tool instead.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_PULL_REQUESTS_USER_TITLE",
        "List pull requests",
    )))
    .with_input_schema(with_cursor_pagination(repo_schema(
        json!({
            "state": { "type": "string", "description": "Filter by state", "enum": ["open", "closed", "all"] },
            "head": { "type": "string", "description": "Filter by head user/org and branch" },
            "base": { "type": "string", "description": "Filter by base branch" },
        }),
        &[],
    )))
    .with_required_scopes([REPO])
}

async fn list_pull_requests_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(format!("{repo}/pulls"))
        .with_optional_query("state", optional_str(&args, "state")?)
        .with_optional_query("head", optional_str(&args, "head")?)
        .with_optional_query("base", optional_str(&args, "base")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list pull requests").await
}

pub(crate) fn create_pull_request(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::pull_requests(),
        "create_pull_request",
        create_pull_request_handler,
    )
    .with_description(t(
        "TOOL_CREATE_PULL_REQUEST_DESCRIPTION",
        "Create a new pull request in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_CREATE_PULL_REQUEST_USER_TITLE",
        "Open new pull request",
    )))
    .with_input_schema(repo_schema(
        json!({
            "title": { "type": "string", "description": "PR title" },
            "body": { "type": "string", "description": "PR description" },
            "head": { "type": "string", "description": "Branch containing changes" },
            "base": { "type": "string", "description": "Branch to merge into" },
            "draft": { "type": "boolean", "description": "Create as draft PR" },
        }),
        &["title", "head", "base"],
    ))
    .with_required_scopes([REPO])
}

async fn create_pull_request_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let body = json!({
        "title": required_str(&args, "title")?,
        "head": required_str(&args, "head")?,
        "base": required_str(&args, "base")?,
        "body": optional_str(&args, "body")?,
        "draft": optional_bool(&args, "draft")?.unwrap_or(false),
    });
    send(
        &deps,
        ApiRequest::post(format!("{repo}/pulls"), body),
        "failed to create pull request",
    )
    .await
}

pub(crate) fn merge_pull_request(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::pull_requests(),
        "merge_pull_request",
        merge_pull_request_handler,
    )
    .with_description(t(
        "TOOL_MERGE_PULL_REQUEST_DESCRIPTION",
        "Merge a pull request in a GitHub repository.",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_MERGE_PULL_REQUEST_USER_TITLE",
        "Merge pull request",
    )))
    .with_input_schema(repo_schema(
        json!({
            "pullNumber": { "type": "number", "description": "Pull request number" },
            "commit_title": { "type": "string", "description": "Title for merge commit" },
            "commit_message": { "type": "string", "description": "Extra detail for merge commit" },
            "merge_method": { "type": "string", "description": "Merge method", "enum": ["merge", "squash", "rebase"] },
        }),
        &["pullNumber"],
    ))
    .with_required_scopes([REPO])
}

async fn merge_pull_request_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let number = required_u64(&args, "pullNumber")?;
    let body = json!({
        "commit_title": optional_str(&args, "commit_title")?,
        "commit_message": optional_str(&args, "commit_message")?,
        "merge_method": optional_str(&args, "merge_method")?,
    });
    send(
        &deps,
        ApiRequest::new(Method::Put, format!("{repo}/pulls/{number}/merge")).with_body(body),
        "failed to merge pull request",
    )
    .await
}

//! Starring tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::optional_str;
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, Method, ToolAnnotations,
    ToolDependencies, ToolDescriptor, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_path, repo_schema, send};
use crate::toolsets;

pub(crate) fn list_starred_repositories(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::stargazers(),
        "list_starred_repositories",
        list_starred_repositories_handler,
    )
    .with_description(t(
        "TOOL_LIST_STARRED_REPOSITORIES_DESCRIPTION",
        "List starred repositories",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_STARRED_REPOSITORIES_USER_TITLE",
        "List starred repositories",
    )))
    .with_input_schema(with_cursor_pagination(json!({
        "type": "object",
        "properties": {
            "username": { "type": "string", "description": "Username to list starred repositories for. Defaults to the authenticated user." },
            "sort": { "type": "string", "description": "How to sort the results.", "enum": ["created", "updated"] },
            "direction": { "type": "string", "description": "The direction to sort the results by.", "enum": ["asc", "desc"] },
        },
    })))
}

async fn list_starred_repositories_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let path = match optional_str(&args, "username")? {
        Some(user) if !user.is_empty() => format!("/users/{user}/starred"),
        _ => "/user/starred".to_owned(),
    };
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(path)
        .with_optional_query("sort", optional_str(&args, "sort")?)
        .with_optional_query("direction", optional_str(&args, "direction")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list starred repositories").await
}

pub(crate) fn star_repository(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::stargazers(),
        "star_repository",
        star_repository_handler,
    )
    .with_description(t("TOOL_STAR_REPOSITORY_DESCRIPTION", "Star a GitHub repository"))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_STAR_REPOSITORY_USER_TITLE",
        "Star repository",
    )))
    .with_input_schema(repo_schema(json!({}), &[]))
}

async fn star_repository_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let path = format!("/user/starred{}", repo.trim_start_matches("/repos"));
    send(
        &deps,
        ApiRequest::new(Method::Put, path),
        "failed to star repository",
    )
    .await
}

pub(crate) fn unstar_repository(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::stargazers(),
        "unstar_repository",
        unstar_repository_handler,
    )
    .with_description(t(
        "TOOL_UNSTAR_REPOSITORY_DESCRIPTION",
        "Unstar a GitHub repository",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_UNSTAR_REPOSITORY_USER_TITLE",
        "Unstar repository",
    )))
    .with_input_schema(repo_schema(json!({}), &[]))
}

async fn unstar_repository_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let path = format!("/user/starred{}", repo.trim_start_matches("/repos"));
    send(
        &deps,
        ApiRequest::new(Method::Delete, path),
        "failed to unstar repository",
    )
    .await
}

//! Repository tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolError, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_path, repo_schema, send};
use crate::scopes::REPO;
use crate::toolsets;

pub(crate) fn search_repositories(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::repos(),
        "search_repositories",
        search_repositories_handler,
    )
    .with_description(t(
        "TOOL_SEARCH_REPOSITORIES_DESCRIPTION",
        "Find GitHub repositories by name, description, readme, topics, or other metadata. Perfect for discovering projects, finding examples, or locating specific repositories across GitHub.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_SEARCH_REPOSITORIES_USER_TITLE",
        "Search repositories",
    )))
    .with_input_schema(with_cursor_pagination(json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Repository search query. Examples: 'machine learning in:name stars:>1000 language:python', 'topic:react'.",
            },
        },
        "required": ["query"],
    })))
}

async fn search_repositories_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let query = required_str(&args, "query")?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get("/search/repositories")
        .with_query("q", query)
        .with_pagination(&pagination);
    send(&deps, request, "failed to search repositories").await
}

pub(crate) fn get_file_contents(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::repos(),
        "get_file_contents",
        get_file_contents_handler,
    )
    .with_description(t(
        "TOOL_GET_FILE_CONTENTS_DESCRIPTION",
        "Get the contents of a file or directory from a GitHub repository",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_FILE_CONTENTS_USER_TITLE",
        "Get file or directory contents",
    )))
    .with_input_schema(repo_schema(
        json!({
            "path": {
                "type": "string",
                "description": "Path to file/directory (directories must end with a slash '/')",
                "default": "/",
            },
            "ref": {
                "type": "string",
                "description": "Accepts optional git refs such as `refs/tags/{tag}`, `refs/heads/{branch}` or `refs/pull/{pr_number}/head`",
            },
        }),
        &[],
    ))
}

async fn get_file_contents_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let path = optional_str(&args, "path")?.unwrap_or_default();
    let path = path.trim_start_matches('/');
    let request = ApiRequest::get(format!("{repo}/contents/{path}"))
        .with_optional_query("ref", optional_str(&args, "ref")?);
    send(&deps, request, "failed to get file contents").await
}

pub(crate) fn list_commits(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::repos(), "list_commits", list_commits_handler)
        .with_description(t(
            "TOOL_LIST_COMMITS_DESCRIPTION",
            "Get list of commits of a branch in a GitHub repository. Returns at least 30 results per page by default, but can return more if specified using the perPage parameter (up to 100).",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_COMMITS_USER_TITLE",
            "List commits",
        )))
        .with_input_schema(with_cursor_pagination(repo_schema(
            json!({
                "sha": {
                    "type": "string",
                    "description": "Commit SHA, branch or tag name to list commits of. If not provided, uses the default branch of the repository.",
                },
                "author": {
                    "type": "string",
                    "description": "Author username or email address to filter commits by",
                },
            }),
            &[],
        )))
        .with_required_scopes([REPO])
}

async fn list_commits_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(format!("{repo}/commits"))
        .with_optional_query("sha", optional_str(&args, "sha")?)
        .with_optional_query("author", optional_str(&args, "author")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list commits").await
}

pub(crate) fn get_commit(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::repos(), "get_commit", get_commit_handler)
        .with_description(t(
            "TOOL_GET_COMMITS_DESCRIPTION",
            "Get details for a commit from a GitHub repository",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_GET_COMMITS_USER_TITLE",
            "Get commit details",
        )))
        .with_input_schema(repo_schema(
            json!({
                "sha": { "type": "string", "description": "Commit SHA, branch name, or tag name" },
            }),
            &["sha"],
        ))
        .with_required_scopes([REPO])
}

async fn get_commit_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let sha = required_str(&args, "sha")?;
    send(
        &deps,
        ApiRequest::get(format!("{repo}/commits/{sha}")),
        "failed to get commit",
    )
    .await
}

pub(crate) fn list_branches(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::repos(), "list_branches", list_branches_handler)
        .with_description(t(
            "TOOL_LIST_BRANCHES_DESCRIPTION",
            "List branches in a GitHub repository",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_BRANCHES_USER_TITLE",
            "List branches",
        )))
        .with_input_schema(with_cursor_pagination(repo_schema(json!({}), &[])))
        .with_required_scopes([REPO])
}

async fn list_branches_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(format!("{repo}/branches")).with_pagination(&pagination);
    send(&deps, request, "failed to list branches").await
}

pub(crate) fn list_releases(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::repos(), "list_releases", list_releases_handler)
        .with_description(t(
            "TOOL_LIST_RELEASES_DESCRIPTION",
            "List releases in a GitHub repository",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_RELEASES_USER_TITLE",
            "List releases",
        )))
        .with_input_schema(with_cursor_pagination(repo_schema(json!({}), &[])))
        .with_required_scopes([REPO])
}

async fn list_releases_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(format!("{repo}/releases")).with_pagination(&pagination);
    send(&deps, request, "failed to list releases").await
}

pub(crate) fn create_branch(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::repos(), "create_branch", create_branch_handler)
        .with_description(t(
            "TOOL_CREATE_BRANCH_DESCRIPTION",
            "Create a new branch in a GitHub repository",
        ))
        .with_annotations(ToolAnnotations::write(t(
            "TOOL_CREATE_BRANCH_USER_TITLE",
            "Create branch",
        )))
        .with_input_schema(repo_schema(
            json!({
                "branch": { "type": "string", "description": "Name for new branch" },
                "from_branch": {
                    "type": "string",
                    "description": "Source branch (defaults to repo default)",
                },
            }),
            &["branch"],
        ))
        .with_required_scopes([REPO])
}

async fn create_branch_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let branch = required_str(&args, "branch")?;

    let from_branch = match optional_str(&args, "from_branch")?.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => {
            let repository = send(
                &deps,
                ApiRequest::get(repo.clone()),
                "failed to get repository",
            )
            .await?;
            repository["default_branch"]
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| ToolError::execution("repository has no default branch"))?
        }
    };

    let reference = send(
        &deps,
        ApiRequest::get(format!("{repo}/git/ref/heads/{from_branch}")),
        "failed to get reference",
    )
    .await?;
    let sha = reference["object"]["sha"]
        .as_str()
        .ok_or_else(|| ToolError::execution(format!("reference for `{from_branch}` has no sha")))?;

    send(
        &deps,
        ApiRequest::post(
            format!("{repo}/git/refs"),
            json!({ "ref": format!("refs/heads/{branch}"), "sha": sha }),
        ),
        "failed to create branch",
    )
    .await
}

pub(crate) fn fork_repository(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::repos(),
        "fork_repository",
        fork_repository_handler,
    )
    .with_description(t(
        "TOOL_FORK_REPOSITORY_DESCRIPTION",
        "Fork a GitHub repository to your account or specified organization",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_FORK_REPOSITORY_USER_TITLE",
        "Fork repository",
    )))
    .with_input_schema(repo_schema(
        json!({
            "organization": { "type": "string", "description": "Organization to fork to" },
        }),
        &[],
    ))
    .with_required_scopes([REPO])
}

async fn fork_repository_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let body = match optional_str(&args, "organization")? {
        Some(organization) => json!({ "organization": organization }),
        None => json!({}),
    };
    send(
        &deps,
        ApiRequest::post(format!("{repo}/forks"), body),
        "failed to fork repository",
    )
    .await
}

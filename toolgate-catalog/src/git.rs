//! Low-level Git data.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_bool, optional_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, ToolAnnotations, ToolDependencies, ToolDescriptor,
    ToolResult, Translator,
};

use crate::request::{repo_path, repo_schema, send};
use crate::scopes::REPO;
use crate::toolsets;

pub(crate) fn get_repository_tree(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::git(),
        "get_repository_tree",
        get_repository_tree_handler,
    )
    .with_description(t(
        "TOOL_GET_REPOSITORY_TREE_DESCRIPTION",
        "Get the tree structure (files and directories) of a GitHub repository at a specific ref or SHA",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_REPOSITORY_TREE_USER_TITLE",
        "Get repository tree",
    )))
    .with_input_schema(repo_schema(
        json!({
            "tree_sha": {
                "type": "string",
                "description": "The SHA1 value or ref (branch or tag) name of the tree. Defaults to the repository's default branch",
            },
            "recursive": {
                "type": "boolean",
                "description": "Setting this parameter to true returns the objects or subtrees referenced by the tree",
                "default": false,
            },
        }),
        &[],
    ))
    .with_required_scopes([REPO])
}

async fn get_repository_tree_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let tree = optional_str(&args, "tree_sha")?.unwrap_or_else(|| "HEAD".to_owned());
    let mut request = ApiRequest::get(format!("{repo}/git/trees/{tree}"));
    if optional_bool(&args, "recursive")?.unwrap_or(false) {
        request = request.with_query("recursive", "1");
    }
    send(&deps, request, "failed to get repository tree").await
}

//! Discussion tools, served through the GraphQL endpoint.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str, required_u64};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_schema, send};
use crate::scopes::REPO;
use crate::toolsets;

const LIST_DISCUSSIONS: &str = "query($owner: String!, $repo: String!, $first: Int!, $after: String, $categoryId: ID) {
  repository(owner: $owner, name: $repo) {
    discussions(first: $first, after: $after, categoryId: $categoryId) {
      nodes { number title createdAt updatedAt url category { name } author { login } }
      pageInfo { hasNextPage endCursor }
      totalCount
    }
  }
}";

const GET_DISCUSSION: &str = "query($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    discussion(number: $number) { number title body createdAt closed isAnswered url category { name } }
  }
}";

const LIST_CATEGORIES: &str = "query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    discussionCategories(first: 25) { nodes { id name } }
  }
}";

fn graphql(query: &str, variables: Value) -> ApiRequest {
    ApiRequest::post("/graphql", json!({ "query": query, "variables": variables }))
}

pub(crate) fn list_discussions(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::discussions(),
        "list_discussions",
        list_discussions_handler,
    )
    .with_description(t(
        "TOOL_LIST_DISCUSSIONS_DESCRIPTION",
        "List discussions for a repository or organisation.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_DISCUSSIONS_USER_TITLE",
        "List discussions",
    )))
    .with_input_schema(with_cursor_pagination(repo_schema(
        json!({
            "category": {
                "type": "string",
                "description": "Optional filter by discussion category ID. If provided, only discussions with this category are listed.",
            },
        }),
        &[],
    )))
    .with_required_scopes([REPO])
}

async fn list_discussions_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let pagination = CursorPagination::from_args(&args)?;
    let variables = json!({
        "owner": required_str(&args, "owner")?,
        "repo": required_str(&args, "repo")?,
        "first": pagination.per_page(),
        "after": pagination.after(),
        "categoryId": optional_str(&args, "category")?,
    });
    send(
        &deps,
        graphql(LIST_DISCUSSIONS, variables),
        "failed to list discussions",
    )
    .await
}

pub(crate) fn get_discussion(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::discussions(),
        "get_discussion",
        get_discussion_handler,
    )
    .with_description(t(
        "TOOL_GET_DISCUSSION_DESCRIPTION",
        "Get a specific discussion by ID",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_DISCUSSION_USER_TITLE",
        "Get discussion",
    )))
    .with_input_schema(repo_schema(
        json!({ "discussionNumber": { "type": "number", "description": "Discussion Number" } }),
        &["discussionNumber"],
    ))
    .with_required_scopes([REPO])
}

async fn get_discussion_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let variables = json!({
        "owner": required_str(&args, "owner")?,
        "repo": required_str(&args, "repo")?,
        "number": required_u64(&args, "discussionNumber")?,
    });
    send(&deps, graphql(GET_DISCUSSION, variables), "failed to get discussion").await
}

pub(crate) fn list_discussion_categories(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::discussions(),
        "list_discussion_categories",
        list_discussion_categories_handler,
    )
    .with_description(t(
        "TOOL_LIST_DISCUSSION_CATEGORIES_DESCRIPTION",
        "List discussion categories with their id and name, for a repository or organisation.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_DISCUSSION_CATEGORIES_USER_TITLE",
        "List discussion categories",
    )))
    .with_input_schema(repo_schema(json!({}), &[]))
    .with_required_scopes([REPO])
}

async fn list_discussion_categories_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let variables = json!({
        "owner": required_str(&args, "owner")?,
        "repo": required_str(&args, "repo")?,
    });
    send(
        &deps,
        graphql(LIST_CATEGORIES, variables),
        "failed to list discussion categories",
    )
    .await
}

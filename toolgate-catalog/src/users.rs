//! User search.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::send;
use crate::toolsets;

pub(crate) fn search_users(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::users(), "search_users", search_users_handler)
        .with_description(t(
            "TOOL_SEARCH_USERS_DESCRIPTION",
            "Find GitHub users by username, real name, or other profile information. Useful for locating developers, contributors, or team members.",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_SEARCH_USERS_USER_TITLE",
            "Search users",
        )))
        .with_input_schema(with_cursor_pagination(json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "User search query. Examples: 'john smith', 'location:seattle', 'followers:>100'.",
                },
                "sort": {
                    "type": "string",
                    "description": "Sort users by number of followers or repositories, or when the person joined GitHub.",
                    "enum": ["followers", "repositories", "joined"],
                },
                "order": {
                    "type": "string",
                    "description": "Sort order",
                    "enum": ["asc", "desc"],
                },
            },
            "required": ["query"],
        })))
}

async fn search_users_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let query = required_str(&args, "query")?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get("/search/users")
        .with_query("q", format!("type:user {query}"))
        .with_optional_query("sort", optional_str(&args, "sort")?)
        .with_optional_query("order", optional_str(&args, "order")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to search users").await
}

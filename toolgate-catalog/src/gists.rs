//! Gist tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_bool, optional_str, required_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, Method, ToolAnnotations,
    ToolDependencies, ToolDescriptor, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::send;
use crate::scopes::GIST;
use crate::toolsets;

pub(crate) fn list_gists(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::gists(), "list_gists", list_gists_handler)
        .with_description(t(
            "TOOL_LIST_GISTS_DESCRIPTION",
            "List gists for a user",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_GISTS",
            "List Gists",
        )))
        .with_input_schema(with_cursor_pagination(json!({
            "type": "object",
            "properties": {
                "username": { "type": "string", "description": "GitHub username (omit for authenticated user's gists)" },
                "since": { "type": "string", "description": "Only gists updated after this time (ISO 8601 timestamp)" },
            },
        })))
}

async fn list_gists_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let path = match optional_str(&args, "username")? {
        Some(user) if !user.is_empty() => format!("/users/{user}/gists"),
        _ => "/gists".to_owned(),
    };
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(path)
        .with_optional_query("since", optional_str(&args, "since")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list gists").await
}

pub(crate) fn get_gist(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::gists(), "get_gist", get_gist_handler)
        .with_description(t(
            "TOOL_GET_GIST_DESCRIPTION",
            "Get gist content of a particular gist, by gist ID",
        ))
        .with_annotations(ToolAnnotations::read_only(t("TOOL_GET_GIST", "Get Gist Content")))
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "gist_id": { "type": "string", "description": "The ID of the gist" },
            },
            "required": ["gist_id"],
        }))
}

async fn get_gist_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let id = required_str(&args, "gist_id")?;
    send(&deps, ApiRequest::get(format!("/gists/{id}")), "failed to get gist").await
}

pub(crate) fn create_gist(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::gists(), "create_gist", create_gist_handler)
        .with_description(t(
            "TOOL_CREATE_GIST_DESCRIPTION",
            "Create a new gist",
        ))
        .with_annotations(ToolAnnotations::write(t("TOOL_CREATE_GIST", "Create Gist")))
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "description": { "type": "string", "description": "Description of the gist" },
                "filename": { "type": "string", "description": "Filename for simple single-file gist creation" },
                "content": { "type": "string", "description": "Content for simple single-file gist creation" },
                "public": { "type": "boolean", "description": "Whether the gist is public", "default": false },
            },
            "required": ["filename", "content"],
        }))
        .with_required_scopes([GIST])
}

async fn create_gist_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let filename = required_str(&args, "filename")?;
    let content = required_str(&args, "content")?;
    let body = json!({
        "description": optional_str(&args, "description")?.unwrap_or_default(),
        "public": optional_bool(&args, "public")?.unwrap_or(false),
        "files": { filename: { "content": content } },
    });
    send(&deps, ApiRequest::post("/gists", body), "failed to create gist").await
}

pub(crate) fn update_gist(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::gists(), "update_gist", update_gist_handler)
        .with_description(t(
            "TOOL_UPDATE_GIST_DESCRIPTION",
            "Update an existing gist",
        ))
        .with_annotations(ToolAnnotations::write(t("TOOL_UPDATE_GIST", "Update Gist")))
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "gist_id": { "type": "string", "description": "ID of the gist to update" },
                "description": { "type": "string", "description": "Updated description of the gist" },
                "filename": { "type": "string", "description": "Filename to update or create" },
                "content": { "type": "string", "description": "Content for the file" },
            },
            "required": ["gist_id", "filename", "content"],
        }))
        .with_required_scopes([GIST])
}

async fn update_gist_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let id = required_str(&args, "gist_id")?;
    let filename = required_str(&args, "filename")?;
    let content = required_str(&args, "content")?;
    let body = json!({
        "description": optional_str(&args, "description")?,
        "files": { filename: { "content": content } },
    });
    send(
        &deps,
        ApiRequest::new(Method::Patch, format!("/gists/{id}")).with_body(body),
        "failed to update gist",
    )
    .await
}

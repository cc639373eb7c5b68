//! Projects tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str, required_u64};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolError, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::send;
use crate::scopes::{PROJECT, READ_PROJECT};
use crate::toolsets;

fn owner_properties() -> Value {
    json!({
        "owner_type": {
            "type": "string",
            "description": "Owner type",
            "enum": ["user", "org"],
        },
        "owner": {
            "type": "string",
            "description": "If owner_type == user it is the handle for the GitHub user account. If owner_type == org it is the name of the organization. The name is not case sensitive.",
        },
    })
}

/// Reads `owner_type` and `owner` as `/orgs/{owner}` or `/users/{owner}`.
fn owner_path(args: &Arguments) -> ToolResult<String> {
    let owner = required_str(args, "owner")?;
    match required_str(args, "owner_type")?.as_str() {
        "org" => Ok(format!("/orgs/{owner}")),
        "user" => Ok(format!("/users/{owner}")),
        other => Err(ToolError::invalid_arguments(format!(
            "owner_type must be 'user' or 'org', got {other}"
        ))),
    }
}

fn schema(extra: Value, required: &[&str]) -> Value {
    let mut properties = owner_properties();
    if let (Some(properties), Value::Object(extra)) = (properties.as_object_mut(), extra) {
        properties.extend(extra);
    }
    let mut names = vec!["owner_type", "owner"];
    names.extend_from_slice(required);
    json!({ "type": "object", "properties": properties, "required": names })
}

pub(crate) fn list_projects(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::projects(), "list_projects", list_projects_handler)
        .with_description(t(
            "TOOL_LIST_PROJECTS_DESCRIPTION",
            "List Projects for a user or organization",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_PROJECTS_USER_TITLE",
            "List projects",
        )))
        .with_input_schema(with_cursor_pagination(schema(
            json!({
                "query": { "type": "string", "description": "Filter projects by title text and open/closed state" },
            }),
            &[],
        )))
        .with_required_scopes([READ_PROJECT])
}

async fn list_projects_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let owner = owner_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(format!("{owner}/projectsV2"))
        .with_optional_query("q", optional_str(&args, "query")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list projects").await
}

pub(crate) fn get_project(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::projects(), "get_project", get_project_handler)
        .with_description(t(
            "TOOL_GET_PROJECT_DESCRIPTION",
            "Get Project for a user or org",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_GET_PROJECT_USER_TITLE",
            "Get project",
        )))
        .with_input_schema(schema(
            json!({ "project_number": { "type": "number", "description": "The project's number" } }),
            &["project_number"],
        ))
        .with_required_scopes([READ_PROJECT])
}

async fn get_project_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let owner = owner_path(&args)?;
    let number = required_u64(&args, "project_number")?;
    send(
        &deps,
        ApiRequest::get(format!("{owner}/projectsV2/{number}")),
        "failed to get project",
    )
    .await
}

pub(crate) fn add_project_item(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::projects(),
        "add_project_item",
        add_project_item_handler,
    )
    .with_description(t(
        "TOOL_ADD_PROJECT_ITEM_DESCRIPTION",
        "Add a specific Project item for a user or org",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_ADD_PROJECT_ITEM_USER_TITLE",
        "Add project item",
    )))
    .with_input_schema(schema(
        json!({
            "project_number": { "type": "number", "description": "The project's number." },
            "item_type": { "type": "string", "description": "The item's type, either issue or pull_request.", "enum": ["issue", "pull_request"] },
            "item_id": { "type": "number", "description": "The numeric ID of the issue or pull request to add to the project." },
        }),
        &["project_number", "item_type", "item_id"],
    ))
    .with_required_scopes([PROJECT])
}

async fn add_project_item_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let owner = owner_path(&args)?;
    let number = required_u64(&args, "project_number")?;
    let item_type = match required_str(&args, "item_type")?.as_str() {
        "issue" => "Issue",
        "pull_request" => "PullRequest",
        other => {
            return Err(ToolError::invalid_arguments(format!(
                "item_type must be either 'issue' or 'pull_request', got {other}"
            )));
        }
    };
    let item_id = required_u64(&args, "item_id")?;
    send(
        &deps,
        ApiRequest::post(
            format!("{owner}/projectsV2/{number}/items"),
            json!({ "type": item_type, "id": item_id }),
        ),
        "failed to add a project item",
    )
    .await
}

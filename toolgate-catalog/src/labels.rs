//! Label tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, Method, ToolAnnotations,
    ToolDependencies, ToolDescriptor, ToolError, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_path, repo_schema, send};
use crate::scopes::REPO;
use crate::toolsets;

pub(crate) fn get_label(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::labels(), "get_label", get_label_handler)
        .with_description(t(
            "TOOL_GET_LABEL_DESCRIPTION",
            "Get a specific label from a repository.",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_GET_LABEL_TITLE",
            "Get a specific label from a repository.",
        )))
        .with_input_schema(repo_schema(
            json!({ "name": { "type": "string", "description": "Label name." } }),
            &["name"],
        ))
        .with_required_scopes([REPO])
}

async fn get_label_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let name = required_str(&args, "name")?;
    send(
        &deps,
        ApiRequest::get(format!("{repo}/labels/{name}")),
        "failed to get label",
    )
    .await
}

pub(crate) fn list_labels(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::labels(), "list_label", list_labels_handler)
        .with_description(t(
            "TOOL_LIST_LABEL_DESCRIPTION",
            "List labels from a repository",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_LABEL_TITLE",
            "List labels from a repository.",
        )))
        .with_input_schema(with_cursor_pagination(repo_schema(json!({}), &[])))
        .with_required_scopes([REPO])
}

async fn list_labels_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    send(
        &deps,
        ApiRequest::get(format!("{repo}/labels")).with_pagination(&pagination),
        "failed to list labels",
    )
    .await
}

pub(crate) fn label_write(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::labels(), "label_write", label_write_handler)
        .with_description(t(
            "TOOL_LABEL_WRITE_DESCRIPTION",
            "Perform write operations on repository labels. To set labels on issues, use the 'issue_write' tool.",
        ))
        .with_annotations(
            ToolAnnotations::write(t(
                "TOOL_LABEL_WRITE_TITLE",
                "Write operations on repository labels.",
            ))
            .destructive(true),
        )
        .with_input_schema(repo_schema(
            json!({
                "method": {
                    "type": "string",
                    "description": "Operation to perform: 'create', 'update', or 'delete'",
                    "enum": ["create", "update", "delete"],
                },
                "name": { "type": "string", "description": "Label name - required for all operations" },
                "new_name": { "type": "string", "description": "New name for the label (used only with 'update' method to rename)" },
                "color": { "type": "string", "description": "Label color as 6-character hex code without '#' prefix (e.g., 'f29513')." },
                "description": { "type": "string", "description": "Label description text. Optional for 'create' and 'update'." },
            }),
            &["method", "name"],
        ))
        .with_required_scopes([REPO])
}

async fn label_write_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let method = required_str(&args, "method")?;
    let name = required_str(&args, "name")?;
    let color = optional_str(&args, "color")?;
    let description = optional_str(&args, "description")?;

    match method.as_str() {
        "create" => {
            let color = color.ok_or_else(|| {
                ToolError::invalid_arguments("color is required for create")
            })?;
            send(
                &deps,
                ApiRequest::post(
                    format!("{repo}/labels"),
                    json!({ "name": name, "color": color, "description": description }),
                ),
                "failed to create label",
            )
            .await
        }
        "update" => {
            let new_name = optional_str(&args, "new_name")?;
            if new_name.is_none() && color.is_none() && description.is_none() {
                return Err(ToolError::invalid_arguments(
                    "at least one of new_name, color, or description must be provided for update",
                ));
            }
            let mut body = serde_json::Map::new();
            if let Some(new_name) = new_name {
                body.insert("new_name".into(), Value::from(new_name));
            }
            if let Some(color) = color {
                body.insert("color".into(), Value::from(color));
            }
            if let Some(description) = description {
                body.insert("description".into(), Value::from(description));
            }
            send(
                &deps,
                ApiRequest::new(Method::Patch, format!("{repo}/labels/{name}"))
                    .with_body(Value::Object(body)),
                "failed to update label",
            )
            .await
        }
        "delete" => {
            send(
                &deps,
                ApiRequest::new(Method::Delete, format!("{repo}/labels/{name}")),
                "failed to delete label",
            )
            .await
        }
        other => Err(ToolError::invalid_arguments(format!(
            "unknown method: {other}"
        ))),
    }
}

//! Runtime toolset discovery.
//!
//! These handlers reach the live catalog through
//! [`CallContext::directory`]; they never touch the inventory directly.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::required_str;
use toolgate_tools::{
    Arguments, CallContext, ToolAnnotations, ToolDependencies, ToolDescriptor, ToolError,
    ToolResult, Translator,
};
use tracing::info;

use crate::toolsets;

fn toolset_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "toolset": {
                "type": "string",
                "description": "The name of the toolset",
            },
        },
        "required": ["toolset"],
    })
}

fn enable_result_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "toolset": { "type": "string" },
            "enabled": { "type": "boolean" },
            "changed": {
                "type": "boolean",
                "description": "False when the toolset was already enabled",
            },
            "message": { "type": "string" },
        },
        "required": ["toolset", "enabled", "changed", "message"],
    })
}

fn to_value<T: serde::Serialize>(value: &T) -> ToolResult<Value> {
    serde_json::to_value(value).map_err(|err| ToolError::execution(err.to_string()))
}

pub(crate) fn list_available_toolsets(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::dynamic(),
        "list_available_toolsets",
        list_available_toolsets_handler,
    )
    .with_description(t(
        "TOOL_LIST_AVAILABLE_TOOLSETS_DESCRIPTION",
        "List all available toolsets this GitHub MCP server can offer, providing the enabled status of each. Use this when a task could be achieved with a GitHub tool and the currently available tools aren't enough. Call get_toolset_tools with these toolset names to discover specific tools you can call",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_AVAILABLE_TOOLSETS_USER_TITLE",
        "List available toolsets",
    )))
}

async fn list_available_toolsets_handler(
    ctx: CallContext,
    _deps: Arc<ToolDependencies>,
    _args: Arguments,
) -> ToolResult<Value> {
    to_value(&ctx.directory()?.toolsets())
}

pub(crate) fn get_toolset_tools(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::dynamic(),
        "get_toolset_tools",
        get_toolset_tools_handler,
    )
    .with_description(t(
        "TOOL_GET_TOOLSET_TOOLS_DESCRIPTION",
        "Lists all the capabilities that are enabled with the specified toolset, use this to get clarity on whether enabling a toolset would help you to complete a task",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_TOOLSET_TOOLS_USER_TITLE",
        "List all tools in a toolset",
    )))
    .with_input_schema(toolset_schema())
}

async fn get_toolset_tools_handler(
    ctx: CallContext,
    _deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let id = required_str(&args, "toolset")?;
    to_value(&ctx.directory()?.toolset_tools(&id)?)
}

pub(crate) fn enable_toolset(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::dynamic(), "enable_toolset", enable_toolset_handler)
        .with_description(t(
            "TOOL_ENABLE_TOOLSET_DESCRIPTION",
            "Enable one of the sets of tools the GitHub MCP server provides, use get_toolset_tools and list_available_toolsets first to see what this will enable",
        ))
        .with_annotations(
            ToolAnnotations::read_only(t(
                "TOOL_ENABLE_TOOLSET_USER_TITLE",
                "Enable a toolset",
            ))
            .idempotent(true),
        )
        .with_input_schema(toolset_schema())
        .with_output_schema(enable_result_schema())
}

async fn enable_toolset_handler(
    ctx: CallContext,
    _deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let id = required_str(&args, "toolset")?;
    let changed = ctx.directory()?.enable_toolset(&id)?;

    let message = if changed {
        info!(toolset = %id, call_id = %ctx.call_id(), "toolset enabled at runtime");
        format!("Toolset {id} enabled")
    } else {
        format!("Toolset {id} is already enabled")
    };
    Ok(json!({ "toolset": id, "enabled": true, "changed": changed, "message": message }))
}

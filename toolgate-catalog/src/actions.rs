//! Actions workflow tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str, required_u64};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, ToolAnnotations, ToolDependencies,
    ToolDescriptor, ToolError, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::{repo_path, repo_schema, send};
use crate::scopes::{REPO, WORKFLOW};
use crate::toolsets;

pub(crate) fn list_workflows(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::actions(), "list_workflows", list_workflows_handler)
        .with_description(t(
            "TOOL_LIST_WORKFLOWS_DESCRIPTION",
            "List workflows in a repository",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_LIST_WORKFLOWS_USER_TITLE",
            "List workflows",
        )))
        .with_input_schema(with_cursor_pagination(repo_schema(json!({}), &[])))
        .with_required_scopes([REPO])
}

async fn list_workflows_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let pagination = CursorPagination::from_args(&args)?;
    send(
        &deps,
        ApiRequest::get(format!("{repo}/actions/workflows")).with_pagination(&pagination),
        "failed to list workflows",
    )
    .await
}

pub(crate) fn list_workflow_runs(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::actions(),
        "list_workflow_runs",
        list_workflow_runs_handler,
    )
    .with_description(t(
        "TOOL_LIST_WORKFLOW_RUNS_DESCRIPTION",
        "List workflow runs for a specific workflow",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_WORKFLOW_RUNS_USER_TITLE",
        "List workflow runs",
    )))
    .with_input_schema(with_cursor_pagination(repo_schema(
        json!({
            "workflow_id": { "type": "string", "description": "The workflow ID or workflow file name" },
            "branch": { "type": "string", "description": "Returns workflow runs associated with a branch" },
            "status": {
                "type": "string",
                "description": "Returns workflow runs with the check run status",
                "enum": ["queued", "in_progress", "completed", "requested", "waiting"],
            },
        }),
        &["workflow_id"],
    )))
    .with_required_scopes([REPO])
}

async fn list_workflow_runs_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let workflow = required_str(&args, "workflow_id")?;
    let pagination = CursorPagination::from_args(&args)?;
    let request = ApiRequest::get(format!("{repo}/actions/workflows/{workflow}/runs"))
        .with_optional_query("branch", optional_str(&args, "branch")?)
        .with_optional_query("status", optional_str(&args, "status")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list workflow runs").await
}

pub(crate) fn get_workflow_run(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::actions(),
        "get_workflow_run",
        get_workflow_run_handler,
    )
    .with_description(t(
        "TOOL_GET_WORKFLOW_RUN_DESCRIPTION",
        "Get details of a specific workflow run",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_WORKFLOW_RUN_USER_TITLE",
        "Get workflow run",
    )))
    .with_input_schema(repo_schema(
        json!({ "run_id": { "type": "number", "description": "The unique identifier of the workflow run" } }),
        &["run_id"],
    ))
    .with_required_scopes([REPO])
}

async fn get_workflow_run_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let run = required_u64(&args, "run_id")?;
    send(
        &deps,
        ApiRequest::get(format!("{repo}/actions/runs/{run}")),
        "failed to get workflow run",
    )
    .await
}

pub(crate) fn run_workflow(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::actions(), "run_workflow", run_workflow_handler)
        .with_description(t(
            "TOOL_RUN_WORKFLOW_DESCRIPTION",
            "Run an Actions workflow by workflow ID or filename",
        ))
        .with_annotations(ToolAnnotations::write(t(
            "TOOL_RUN_WORKFLOW_USER_TITLE",
            "Run workflow",
        )))
        .with_input_schema(repo_schema(
            json!({
                "workflow_id": { "type": "string", "description": "The workflow ID (numeric) or workflow file name (e.g., main.yml, ci.yaml)" },
                "ref": { "type": "string", "description": "The git reference for the workflow. The reference can be a branch or tag name." },
                "inputs": { "type": "object", "description": "Inputs the workflow accepts" },
            }),
            &["workflow_id", "ref"],
        ))
        .with_required_scopes([WORKFLOW])
}

async fn run_workflow_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let workflow = required_str(&args, "workflow_id")?;
    let reference = required_str(&args, "ref")?;
    let inputs = match args.get("inputs") {
        None | Some(Value::Null) => json!({}),
        Some(inputs @ Value::Object(_)) => inputs.clone(),
        Some(_) => {
            return Err(ToolError::invalid_arguments(
                "parameter inputs is not of type object",
            ));
        }
    };

    send(
        &deps,
        ApiRequest::post(
            format!("{repo}/actions/workflows/{workflow}/dispatches"),
            json!({ "ref": reference, "inputs": inputs }),
        ),
        "failed to run workflow",
    )
    .await?;

    Ok(json!({
        "message": "Workflow run has been queued",
        "workflow_id": workflow,
        "ref": reference,
    }))
}

pub(crate) fn cancel_workflow_run(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::actions(),
        "cancel_workflow_run",
        cancel_workflow_run_handler,
    )
    .with_description(t(
        "TOOL_CANCEL_WORKFLOW_RUN_DESCRIPTION",
        "Cancel a workflow run",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_CANCEL_WORKFLOW_RUN_USER_TITLE",
        "Cancel workflow run",
    )))
    .with_input_schema(repo_schema(
        json!({ "run_id": { "type": "number", "description": "The unique identifier of the workflow run" } }),
        &["run_id"],
    ))
    .with_required_scopes([WORKFLOW])
}

async fn cancel_workflow_run_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let repo = repo_path(&args)?;
    let run = required_u64(&args, "run_id")?;
    send(
        &deps,
        ApiRequest::post(format!("{repo}/actions/runs/{run}/cancel"), json!({})),
        "failed to cancel workflow run",
    )
    .await
}

//! Notification tools.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_bool, optional_str, required_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, CursorPagination, Method, ToolAnnotations,
    ToolDependencies, ToolDescriptor, ToolError, ToolResult, Translator, with_cursor_pagination,
};

use crate::request::send;
use crate::scopes::NOTIFICATIONS;
use crate::toolsets;

pub(crate) fn list_notifications(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::notifications(),
        "list_notifications",
        list_notifications_handler,
    )
    .with_description(t(
        "TOOL_LIST_NOTIFICATIONS_DESCRIPTION",
        "Lists all GitHub notifications for the authenticated user, including unread notifications, mentions, review requests, assignments, and updates on issues or pull requests. Use this tool whenever the user asks what to work on next, requests a summary of their GitHub activity, wants to see pending reviews, or needs to check for new updates or tasks.",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_LIST_NOTIFICATIONS_USER_TITLE",
        "List notifications",
    )))
    .with_input_schema(with_cursor_pagination(json!({
        "type": "object",
        "properties": {
            "filter": {
                "type": "string",
                "description": "Filter notifications to, use default unless specified. Read notifications are ones that have already been acknowledged by the user.",
                "enum": ["default", "include_read_notifications", "only_participating"],
            },
            "since": { "type": "string", "description": "Only show notifications updated after the given time (ISO 8601 format)" },
            "owner": { "type": "string", "description": "Optional repository owner. If provided with repo, only notifications for this repository are listed." },
            "repo": { "type": "string", "description": "Optional repository name. If provided with owner, only notifications for this repository are listed." },
        },
    })))
    .with_required_scopes([NOTIFICATIONS])
}

async fn list_notifications_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let pagination = CursorPagination::from_args(&args)?;
    let path = match (optional_str(&args, "owner")?, optional_str(&args, "repo")?) {
        (Some(owner), Some(repo)) => format!("/repos/{owner}/{repo}/notifications"),
        _ => "/notifications".to_owned(),
    };

    let mut request = ApiRequest::get(path);
    match optional_str(&args, "filter")?.as_deref() {
        None | Some("default") => {}
        Some("include_read_notifications") => request = request.with_query("all", "true"),
        Some("only_participating") => request = request.with_query("participating", "true"),
        Some(other) => {
            return Err(ToolError::invalid_arguments(format!(
                "unknown filter: {other}"
            )));
        }
    }

    let request = request
        .with_optional_query("since", optional_str(&args, "since")?)
        .with_pagination(&pagination);
    send(&deps, request, "failed to list notifications").await
}

pub(crate) fn dismiss_notification(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::notifications(),
        "dismiss_notification",
        dismiss_notification_handler,
    )
    .with_description(t(
        "TOOL_DISMISS_NOTIFICATION_DESCRIPTION",
        "Dismiss a notification by marking it as read or done",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_DISMISS_NOTIFICATION_USER_TITLE",
        "Dismiss notification",
    )))
    .with_input_schema(json!({
        "type": "object",
        "properties": {
            "threadID": { "type": "string", "description": "The ID of the notification thread" },
            "state": { "type": "string", "description": "The new state of the notification (read/done)", "enum": ["read", "done"] },
        },
        "required": ["threadID", "state"],
    }))
    .with_required_scopes([NOTIFICATIONS])
}

async fn dismiss_notification_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let thread = required_str(&args, "threadID")?;
    let request = match required_str(&args, "state")?.as_str() {
        "done" => ApiRequest::new(Method::Delete, format!("/notifications/threads/{thread}")),
        "read" => ApiRequest::new(Method::Patch, format!("/notifications/threads/{thread}")),
        other => {
            return Err(ToolError::invalid_arguments(format!(
                "invalid state: must be 'read' or 'done', got {other}"
            )));
        }
    };
    send(&deps, request, "failed to dismiss notification").await
}

pub(crate) fn mark_all_notifications_read(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::notifications(),
        "mark_all_notifications_read",
        mark_all_notifications_read_handler,
    )
    .with_description(t(
        "TOOL_MARK_ALL_NOTIFICATIONS_READ_DESCRIPTION",
        "Mark all notifications as read",
    ))
    .with_annotations(ToolAnnotations::write(t(
        "TOOL_MARK_ALL_NOTIFICATIONS_READ_USER_TITLE",
        "Mark all notifications as read",
    )))
    .with_input_schema(json!({
        "type": "object",
        "properties": {
            "lastReadAt": { "type": "string", "description": "Describes the last point that notifications were checked (optional). Default: Now" },
            "read": { "type": "boolean", "description": "Whether the notifications have been read" },
        },
    }))
    .with_required_scopes([NOTIFICATIONS])
}

async fn mark_all_notifications_read_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let body = json!({
        "last_read_at": optional_str(&args, "lastReadAt")?,
        "read": optional_bool(&args, "read")?.unwrap_or(true),
    });
    send(
        &deps,
        ApiRequest::new(Method::Put, "/notifications").with_body(body),
        "failed to mark all notifications as read",
    )
    .await
}

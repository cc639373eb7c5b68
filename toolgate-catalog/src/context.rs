//! Tools describing the authenticated user.

use std::sync::Arc;

use serde_json::{Value, json};
use toolgate_tools::args::{optional_str, required_str};
use toolgate_tools::{
    ApiRequest, Arguments, CallContext, ToolAnnotations, ToolDependencies, ToolDescriptor,
    ToolResult, Translator,
};

use crate::request::send;
use crate::scopes::READ_ORG;
use crate::toolsets;

pub(crate) fn get_me(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::context(), "get_me", get_me_handler)
        .with_description(t(
            "TOOL_GET_ME_DESCRIPTION",
            "Get details of the authenticated GitHub user. Use this when a request is about the user's own profile for GitHub. Or when information is missing to build other tool calls.",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_GET_ME_USER_TITLE",
            "Get my user profile",
        )))
}

async fn get_me_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    _args: Arguments,
) -> ToolResult<Value> {
    send(&deps, ApiRequest::get("/user"), "failed to get user").await
}

pub(crate) fn get_teams(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(&toolsets::context(), "get_teams", get_teams_handler)
        .with_description(t(
            "TOOL_GET_TEAMS_DESCRIPTION",
            "Get details of the teams the user is a member of. Limited to organizations accessible with current credentials",
        ))
        .with_annotations(ToolAnnotations::read_only(t(
            "TOOL_GET_TEAMS_TITLE",
            "Get teams",
        )))
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "user": {
                    "type": "string",
                    "description": "Username to get teams for. If not provided, uses the authenticated user.",
                },
            },
        }))
        .with_required_scopes([READ_ORG])
}

async fn get_teams_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let request = match optional_str(&args, "user")? {
        Some(user) if !user.is_empty() => ApiRequest::get(format!("/users/{user}/teams")),
        _ => ApiRequest::get("/user/teams"),
    };
    send(&deps, request, "failed to get teams").await
}

pub(crate) fn get_team_members(t: &Translator) -> ToolDescriptor {
    ToolDescriptor::new(
        &toolsets::context(),
        "get_team_members",
        get_team_members_handler,
    )
    .with_description(t(
        "TOOL_GET_TEAM_MEMBERS_DESCRIPTION",
        "Get member usernames of a specific team in an organization. Limited to organizations accessible with current credentials",
    ))
    .with_annotations(ToolAnnotations::read_only(t(
        "TOOL_GET_TEAM_MEMBERS_TITLE",
        "Get team members",
    )))
    .with_input_schema(json!({
        "type": "object",
        "properties": {
            "org": { "type": "string", "description": "Organization login (owner) that contains the team." },
            "team_slug": { "type": "string", "description": "Team slug" },
        },
        "required": ["org", "team_slug"],
    }))
    .with_required_scopes([READ_ORG])
}

async fn get_team_members_handler(
    _ctx: CallContext,
    deps: Arc<ToolDependencies>,
    args: Arguments,
) -> ToolResult<Value> {
    let org = required_str(&args, "org")?;
    let team = required_str(&args, "team_slug")?;
    send(
        &deps,
        ApiRequest::get(format!("/orgs/{org}/teams/{team}/members")),
        "failed to get team members",
    )
    .await
}

//! GitHub-style catalog served by toolgate.
//!
//! [`all_tools`] returns every tool declaration in a stable order, each
//! built by a pure function of the [`Translator`]. [`new_inventory`] pairs
//! them with [`all_toolsets`] and validates the result.

#![warn(missing_docs, clippy::pedantic)]

mod actions;
mod context;
mod discussions;
mod dynamic;
mod gists;
mod git;
mod issues;
mod labels;
mod notifications;
mod orgs;
mod projects;
mod pull_requests;
mod repos;
mod request;
pub mod scopes;
mod security;
mod stargazers;
pub mod toolsets;
mod users;

use toolgate_inventory::{Inventory, InventoryResult};
use toolgate_primitives::ToolsetId;
use toolgate_tools::translate::passthrough;
use toolgate_tools::{ToolDescriptor, Translator};

pub use toolsets::{all_toolsets, remote_only_toolsets};

/// Toolsets left out of the help listing: `context` is always on and
/// `dynamic` is a mode rather than a group of tools.
pub const HELP_HIDDEN_TOOLSETS: [&str; 2] = ["context", "dynamic"];

/// Every tool in the catalog, in declaration order.
#[must_use]
pub fn all_tools(t: &Translator) -> Vec<ToolDescriptor> {
    vec![
        // context
        context::get_me(t),
        context::get_teams(t),
        context::get_team_members(t),
        // repos
        repos::search_repositories(t),
        repos::get_file_contents(t),
        repos::list_commits(t),
        repos::get_commit(t),
        repos::list_branches(t),
        repos::list_releases(t),
        repos::create_branch(t),
        repos::fork_repository(t),
        // git
        git::get_repository_tree(t),
        // issues
        issues::issue_read(t),
        issues::search_issues(t),
        issues::list_issues(t),
        issues::issue_write(t),
        issues::add_issue_comment(t),
        // users
        users::search_users(t),
        // orgs
        orgs::search_orgs(t),
        orgs::get_org_audit_log(t),
        // pull requests
        pull_requests::pull_request_read(t),
        pull_requests::list_pull_requests(t),
        pull_requests::merge_pull_request(t),
        pull_requests::create_pull_request(t),
        // security
        security::get_code_scanning_alert(t),
        security::list_code_scanning_alerts(t),
        security::get_secret_scanning_alert(t),
        security::list_secret_scanning_alerts(t),
        security::get_dependabot_alert(t),
        security::list_dependabot_alerts(t),
        // notifications
        notifications::list_notifications(t),
        notifications::dismiss_notification(t),
        notifications::mark_all_notifications_read(t),
        // discussions
        discussions::list_discussions(t),
        discussions::get_discussion(t),
        discussions::list_discussion_categories(t),
        // actions
        actions::list_workflows(t),
        actions::list_workflow_runs(t),
        actions::get_workflow_run(t),
        actions::run_workflow(t),
        actions::cancel_workflow_run(t),
        // advisories
        security::list_global_security_advisories(t),
        security::get_global_security_advisory(t),
        // gists
        gists::list_gists(t),
        gists::get_gist(t),
        gists::create_gist(t),
        gists::update_gist(t),
        // projects
        projects::list_projects(t),
        projects::get_project(t),
        projects::add_project_item(t),
        // stargazers
        stargazers::list_starred_repositories(t),
        stargazers::star_repository(t),
        stargazers::unstar_repository(t),
        // labels
        labels::get_label(t),
        labels::list_labels(t),
        labels::label_write(t),
        // dynamic
        dynamic::list_available_toolsets(t),
        dynamic::get_toolset_tools(t),
        dynamic::enable_toolset(t),
    ]
}

/// Builds the inventory of the full catalog.
///
/// # Errors
///
/// Returns the first declaration defect found by
/// [`toolgate_inventory::InventoryBuilder::build`].
pub fn new_inventory(t: &Translator) -> InventoryResult<Inventory> {
    Inventory::builder()
        .with_toolsets(all_toolsets())
        .with_tools(all_tools(t))
        .build()
}

/// Help text for the toolset selection flag.
///
/// # Errors
///
/// Fails only if the catalog itself is inconsistent.
pub fn toolsets_help() -> InventoryResult<String> {
    let inventory = new_inventory(&passthrough)?;
    Ok(toolgate_inventory::toolsets_help(
        &inventory,
        &HELP_HIDDEN_TOOLSETS,
    ))
}

/// Identifiers the `default` keyword expands to.
#[must_use]
pub fn default_toolset_ids() -> Vec<ToolsetId> {
    all_toolsets()
        .into_iter()
        .filter(toolgate_tools::ToolsetMetadata::is_default)
        .map(|toolset| toolset.id().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use toolgate_primitives::{CallId, Scope};
    use toolgate_tools::{
        ApiClient, ApiRequest, Arguments, CallContext, Method, ToolDependencies, ToolError,
        ToolResult,
    };

    #[derive(Default)]
    struct RecordingClient {
        requests: Mutex<Vec<ApiRequest>>,
        reply: Option<Value>,
        status: Option<u16>,
    }

    #[async_trait]
    impl ApiClient for RecordingClient {
        async fn send(&self, request: ApiRequest) -> ToolResult<Value> {
            self.requests.lock().unwrap().push(request);
            if let Some(status) = self.status {
                return Err(ToolError::upstream(status, "Not Found"));
            }
            Ok(self.reply.clone().unwrap_or_else(|| json!({})))
        }
    }

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn tool(name: &str) -> ToolDescriptor {
        all_tools(&passthrough)
            .into_iter()
            .find(|tool| tool.name() == name)
            .unwrap()
    }

    async fn call(
        name: &str,
        client: &Arc<RecordingClient>,
        arguments: Value,
    ) -> ToolResult<Value> {
        let deps = Arc::new(ToolDependencies::with_client(client.clone()));
        tool(name)
            .invoke(CallContext::new(CallId::random()), deps, args(arguments))
            .await
    }

    #[test]
    fn catalog_builds() {
        let inventory = new_inventory(&passthrough).unwrap();
        assert_eq!(inventory.toolsets().len(), all_toolsets().len());
        assert_eq!(inventory.tools().len(), all_tools(&passthrough).len());

        for toolset in all_toolsets() {
            assert!(
                ToolsetId::new(toolset.id().as_str()).is_ok(),
                "{} is not a valid id",
                toolset.id()
            );
        }
    }

    #[test]
    fn scopes_are_well_formed() {
        for scope in scopes::ALL {
            assert!(Scope::new(scope.as_str()).is_ok(), "{scope}");
        }
    }

    #[test]
    fn every_toolset_with_tools_is_declared() {
        let declared: HashSet<_> = all_toolsets().into_iter().map(|t| t.id().clone()).collect();
        for tool in all_tools(&passthrough) {
            assert!(declared.contains(tool.toolset()), "{}", tool.name());
            assert!(!tool.description().is_empty(), "{}", tool.name());
        }
    }

    #[test]
    fn remote_only_toolsets_are_not_registered() {
        let inventory = new_inventory(&passthrough).unwrap();
        for toolset in remote_only_toolsets() {
            assert!(!inventory.has_toolset(toolset.id().as_str()));
        }
    }

    #[test]
    fn defaults_match_declarations() {
        let ids: Vec<_> = default_toolset_ids()
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect();
        assert_eq!(ids, ["context", "repos", "issues", "pull_requests", "users"]);
    }

    #[test]
    fn translations_override_declared_text() {
        let translate = |key: &str, fallback: &str| {
            if key == "TOOL_GET_ORG_AUDIT_LOG_DESCRIPTION" {
                "Audit-Log abrufen".to_owned()
            } else {
                fallback.to_owned()
            }
        };
        let tools = all_tools(&translate);
        let audit = tools
            .iter()
            .find(|tool| tool.name() == "get_org_audit_log")
            .unwrap();
        assert_eq!(audit.description(), "Audit-Log abrufen");
        assert_eq!(
            audit.annotations().title(),
            Some("Get Organization Audit Log")
        );
    }

    #[test]
    fn help_lists_toolsets_and_defaults() {
        let help = toolsets_help().unwrap();
        assert!(help.starts_with(
            "Comma-separated list of tool groups to enable (no spaces).\n\
             Available: repos, git, issues, pull_requests, users, orgs, actions, code_security,\n\t     \
             secret_protection, dependabot, notifications, discussions, gists,\n\t     \
             security_advisories, projects, stargazers, labels\n"
        ));
        assert!(help.contains(
            "  - default: Enables the default toolset configuration of:\n\t     context, repos, issues, pull_requests, users\n"
        ));
        assert!(help.ends_with("  - All tools: --toolsets=all"));
    }

    #[test]
    fn audit_log_requires_admin_org() {
        let audit = tool("get_org_audit_log");
        assert!(audit.is_read_only());
        assert!(audit.required_scopes().contains(&scopes::ADMIN_ORG));
        assert_eq!(audit.input_schema()["required"], json!(["org"]));
        assert!(audit.input_schema()["properties"]["perPage"].is_object());
    }

    #[tokio::test]
    async fn audit_log_forwards_filters_and_cursor() {
        let client = Arc::new(RecordingClient {
            reply: Some(json!([{ "action": "repo.create" }])),
            ..RecordingClient::default()
        });

        let output = call(
            "get_org_audit_log",
            &client,
            json!({ "org": "octo-org", "phrase": "action:repo.create", "order": "asc", "perPage": 50, "after": "Y3Vyc29y" }),
        )
        .await
        .unwrap();
        assert_eq!(output, json!([{ "action": "repo.create" }]));

        let requests = client.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), "/orgs/octo-org/audit-log");
        assert_eq!(request.query_value("phrase"), Some("action:repo.create"));
        assert_eq!(request.query_value("order"), Some("asc"));
        assert_eq!(request.query_value("include"), None);
        assert_eq!(request.query_value("per_page"), Some("50"));
        assert_eq!(request.query_value("after"), Some("Y3Vyc29y"));
    }

    #[tokio::test]
    async fn audit_log_rejects_missing_org_before_sending() {
        let client = Arc::new(RecordingClient::default());
        let err = call("get_org_audit_log", &client, json!({})).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::invalid_arguments("missing required parameter: org")
        );
        assert!(client.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failures_keep_status_and_gain_context() {
        let client = Arc::new(RecordingClient {
            status: Some(404),
            ..RecordingClient::default()
        });
        let err = call("list_workflows", &client, json!({ "owner": "octo", "repo": "hello" }))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ToolError::upstream(404, "failed to list workflows: Not Found")
        );
    }

    #[tokio::test]
    async fn create_gist_builds_single_file_body() {
        let client = Arc::new(RecordingClient::default());
        call(
            "create_gist",
            &client,
            json!({ "filename": "notes.md", "content": "# hi", "public": true }),
        )
        .await
        .unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].path(), "/gists");
        assert_eq!(
            requests[0].body(),
            Some(&json!({
                "description": "",
                "public": true,
                "files": { "notes.md": { "content": "# hi" } },
            }))
        );
    }

    #[tokio::test]
    async fn run_workflow_reports_queued_run() {
        let client = Arc::new(RecordingClient::default());
        let output = call(
            "run_workflow",
            &client,
            json!({ "owner": "octo", "repo": "hello", "workflow_id": "ci.yml", "ref": "main" }),
        )
        .await
        .unwrap();
        assert_eq!(output["message"], "Workflow run has been queued");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].method(), Method::Post);
        assert_eq!(
            requests[0].path(),
            "/repos/octo/hello/actions/workflows/ci.yml/dispatches"
        );
        assert_eq!(
            requests[0].body(),
            Some(&json!({ "ref": "main", "inputs": {} }))
        );
    }

    #[tokio::test]
    async fn create_branch_resolves_default_branch() {
        let client = Arc::new(RecordingClient {
            reply: Some(json!({ "default_branch": "main", "object": { "sha": "abc123" } })),
            ..RecordingClient::default()
        });
        call(
            "create_branch",
            &client,
            json!({ "owner": "octo", "repo": "hello", "branch": "feature" }),
        )
        .await
        .unwrap();

        let requests = client.requests.lock().unwrap();
        let paths: Vec<_> = requests.iter().map(ApiRequest::path).collect();
        assert_eq!(
            paths,
            [
                "/repos/octo/hello",
                "/repos/octo/hello/git/ref/heads/main",
                "/repos/octo/hello/git/refs",
            ]
        );
        assert_eq!(
            requests[2].body(),
            Some(&json!({ "ref": "refs/heads/feature", "sha": "abc123" }))
        );
    }

    #[tokio::test]
    async fn discovery_tools_need_a_directory() {
        let client = Arc::new(RecordingClient::default());
        let err = call("list_available_toolsets", &client, json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Unavailable { .. }));
    }

    #[test]
    fn enable_toolset_declares_its_result_shape() {
        let inventory = new_inventory(&passthrough).unwrap();
        let tool = inventory.tool_by_name("enable_toolset").unwrap();
        assert_eq!(tool.annotations().idempotent_hint(), Some(true));

        let schema = tool.output_schema().unwrap();
        assert_eq!(
            schema["required"],
            json!(["toolset", "enabled", "changed", "message"])
        );
        assert!(
            inventory
                .tool_by_name("list_gists")
                .unwrap()
                .output_schema()
                .is_none()
        );
    }
}

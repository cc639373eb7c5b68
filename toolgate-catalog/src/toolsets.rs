//! Toolset declarations.
//!
//! Icons are Octicon names.

use toolgate_primitives::ToolsetId;
use toolgate_tools::ToolsetMetadata;

fn toolset(id: &'static str, description: &str, icon: &str) -> ToolsetMetadata {
    ToolsetMetadata::new(ToolsetId::from_static(id), description.to_owned(), icon.to_owned())
}

/// Current user and operating context.
#[must_use]
pub fn context() -> ToolsetMetadata {
    toolset(
        "context",
        "Tools that provide context about the current user and GitHub context you are operating in",
        "person",
    )
    .with_default(true)
}

/// Repository contents, branches, commits, and releases.
#[must_use]
pub fn repos() -> ToolsetMetadata {
    toolset("repos", "GitHub Repository related tools", "repo").with_default(true)
}

/// Low-level Git data.
#[must_use]
pub fn git() -> ToolsetMetadata {
    toolset(
        "git",
        "GitHub Git API related tools for low-level Git operations",
        "git-branch",
    )
}

/// Issues and issue comments.
#[must_use]
pub fn issues() -> ToolsetMetadata {
    toolset("issues", "GitHub Issues related tools", "issue-opened").with_default(true)
}

/// Pull requests and reviews.
#[must_use]
pub fn pull_requests() -> ToolsetMetadata {
    toolset(
        "pull_requests",
        "GitHub Pull Request related tools",
        "git-pull-request",
    )
    .with_default(true)
}

/// User search.
#[must_use]
pub fn users() -> ToolsetMetadata {
    toolset("users", "GitHub User related tools", "people").with_default(true)
}

/// Organizations.
#[must_use]
pub fn orgs() -> ToolsetMetadata {
    toolset("orgs", "GitHub Organization related tools", "organization")
}

/// Actions workflows and runs.
#[must_use]
pub fn actions() -> ToolsetMetadata {
    toolset(
        "actions",
        "GitHub Actions workflows and CI/CD operations",
        "workflow",
    )
}

/// Code scanning.
#[must_use]
pub fn code_security() -> ToolsetMetadata {
    toolset(
        "code_security",
        "Code security related tools, such as GitHub Code Scanning",
        "codescan",
    )
}

/// Secret scanning.
#[must_use]
pub fn secret_protection() -> ToolsetMetadata {
    toolset(
        "secret_protection",
        "Secret protection related tools, such as GitHub Secret Scanning",
        "shield-lock",
    )
}

/// Dependabot alerts.
#[must_use]
pub fn dependabot() -> ToolsetMetadata {
    toolset("dependabot", "Dependabot tools", "dependabot")
}

/// Notifications.
#[must_use]
pub fn notifications() -> ToolsetMetadata {
    toolset("notifications", "GitHub Notifications related tools", "bell")
}

/// Discussions.
#[must_use]
pub fn discussions() -> ToolsetMetadata {
    toolset(
        "discussions",
        "GitHub Discussions related tools",
        "comment-discussion",
    )
}

/// Gists.
#[must_use]
pub fn gists() -> ToolsetMetadata {
    toolset("gists", "GitHub Gist related tools", "logo-gist")
}

/// Global and repository security advisories.
#[must_use]
pub fn security_advisories() -> ToolsetMetadata {
    toolset(
        "security_advisories",
        "Security advisories related tools",
        "shield",
    )
}

/// Projects.
#[must_use]
pub fn projects() -> ToolsetMetadata {
    toolset("projects", "GitHub Projects related tools", "project")
}

/// Stars.
#[must_use]
pub fn stargazers() -> ToolsetMetadata {
    toolset("stargazers", "GitHub Stargazers related tools", "star")
}

/// Runtime toolset discovery.
#[must_use]
pub fn dynamic() -> ToolsetMetadata {
    toolset(
        "dynamic",
        "Discover GitHub MCP tools that can help achieve tasks by enabling additional sets of tools, you can control the enablement of any toolset to access its tools when this toolset is enabled.",
        "tools",
    )
}

/// Labels.
#[must_use]
pub fn labels() -> ToolsetMetadata {
    toolset("labels", "GitHub Labels related tools", "tag")
}

/// Every toolset served locally, in declaration order.
#[must_use]
pub fn all_toolsets() -> Vec<ToolsetMetadata> {
    vec![
        context(),
        repos(),
        git(),
        issues(),
        pull_requests(),
        users(),
        orgs(),
        actions(),
        code_security(),
        secret_protection(),
        dependabot(),
        notifications(),
        discussions(),
        gists(),
        security_advisories(),
        projects(),
        stargazers(),
        dynamic(),
        labels(),
    ]
}

/// Toolsets only served by the hosted deployment.
///
/// They are documented alongside the local catalog but never registered in
/// a local inventory.
#[must_use]
pub fn remote_only_toolsets() -> Vec<ToolsetMetadata> {
    vec![
        toolset("copilot", "Copilot related tools", "copilot"),
        toolset("copilot_spaces", "Copilot Spaces tools", "copilot"),
        toolset(
            "github_support_docs_search",
            "Retrieve documentation to answer GitHub product and support questions. Topics include: GitHub Actions Workflows, Authentication, ...",
            "book",
        ),
    ]
}

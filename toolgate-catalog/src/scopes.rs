//! OAuth scopes required by catalog tools.

use toolgate_primitives::Scope;

/// Full control of private repositories.
pub const REPO: Scope = Scope::from_static("repo");
/// Read organization and team membership.
pub const READ_ORG: Scope = Scope::from_static("read:org");
/// Full control of organizations, including audit logs.
pub const ADMIN_ORG: Scope = Scope::from_static("admin:org");
/// Create gists.
pub const GIST: Scope = Scope::from_static("gist");
/// Access notifications.
pub const NOTIFICATIONS: Scope = Scope::from_static("notifications");
/// Update Actions workflow files and trigger runs.
pub const WORKFLOW: Scope = Scope::from_static("workflow");
/// Read and write projects.
pub const PROJECT: Scope = Scope::from_static("project");
/// Read projects.
pub const READ_PROJECT: Scope = Scope::from_static("read:project");
/// Read and write security events.
pub const SECURITY_EVENTS: Scope = Scope::from_static("security_events");

/// Every scope referenced by the catalog.
pub const ALL: [Scope; 9] = [
    REPO,
    READ_ORG,
    ADMIN_ORG,
    GIST,
    NOTIFICATIONS,
    WORKFLOW,
    PROJECT,
    READ_PROJECT,
    SECURITY_EVENTS,
];

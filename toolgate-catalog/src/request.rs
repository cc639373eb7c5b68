//! Shared plumbing for tools that forward a single request upstream.

use serde_json::{Value, json};
use toolgate_tools::args::required_str;
use toolgate_tools::{ApiRequest, Arguments, ToolDependencies, ToolError, ToolResult};

/// Sends `request` through the shared client, prefixing upstream failures
/// with `failure`.
pub(crate) async fn send(
    deps: &ToolDependencies,
    request: ApiRequest,
    failure: &str,
) -> ToolResult<Value> {
    let client = deps.client().await?;
    client.send(request).await.map_err(|err| match err {
        ToolError::Upstream { status, message } => {
            ToolError::upstream(status, format!("{failure}: {message}"))
        }
        other => other,
    })
}

/// Reads the `owner` and `repo` parameters as a `/repos/{owner}/{repo}` path.
pub(crate) fn repo_path(args: &Arguments) -> ToolResult<String> {
    let owner = required_str(args, "owner")?;
    let repo = required_str(args, "repo")?;
    Ok(format!("/repos/{owner}/{repo}"))
}

/// Schema properties for the `owner`/`repo` pair.
pub(crate) fn repo_properties() -> Value {
    json!({
        "owner": { "type": "string", "description": "Repository owner" },
        "repo": { "type": "string", "description": "Repository name" },
    })
}

/// Builds an object schema from `repo_properties` plus `extra`, requiring
/// `owner`, `repo`, and `required`.
pub(crate) fn repo_schema(extra: Value, required: &[&str]) -> Value {
    let mut properties = repo_properties();
    if let (Some(properties), Value::Object(extra)) = (properties.as_object_mut(), extra) {
        properties.extend(extra);
    }

    let mut names = vec!["owner", "repo"];
    names.extend_from_slice(required);
    json!({
        "type": "object",
        "properties": properties,
        "required": names,
    })
}

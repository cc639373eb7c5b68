//! Outbound API client contract and the lazily-initialised dependency bundle.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{ToolError, ToolResult};
use crate::pagination::CursorPagination;

/// HTTP verb of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

/// Transport-agnostic description of one outbound REST call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    method: Method,
    path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    query: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request with no query or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a `POST` request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a query parameter when a value is present.
    #[must_use]
    pub fn with_optional_query(self, key: impl Into<String>, value: Option<String>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Appends `per_page` and, when set, `after` cursor parameters.
    #[must_use]
    pub fn with_pagination(self, pagination: &CursorPagination) -> Self {
        self.with_query("per_page", pagination.per_page().to_string())
            .with_optional_query("after", pagination.after().map(str::to_owned))
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the value of the first query parameter named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Outbound client fulfilling tool requests against the remote service.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Sends the request and returns the decoded JSON response.
    ///
    /// Implementations map non-success statuses to [`ToolError::Upstream`].
    async fn send(&self, request: ApiRequest) -> ToolResult<Value>;
}

/// Builds API clients on first use.
#[async_trait]
pub trait ApiClientFactory: Send + Sync {
    /// Constructs a client.
    async fn create(&self) -> ToolResult<Arc<dyn ApiClient>>;
}

struct Prebuilt(Arc<dyn ApiClient>);

#[async_trait]
impl ApiClientFactory for Prebuilt {
    async fn create(&self) -> ToolResult<Arc<dyn ApiClient>> {
        Ok(Arc::clone(&self.0))
    }
}

struct Unconfigured;

#[async_trait]
impl ApiClientFactory for Unconfigured {
    async fn create(&self) -> ToolResult<Arc<dyn ApiClient>> {
        Err(ToolError::Client {
            reason: "no API client configured".into(),
        })
    }
}

/// Dependency bundle handed to every tool handler.
///
/// The client is constructed at most once, on the first handler that asks
/// for it; a failed construction is retried by the next caller.
pub struct ToolDependencies {
    factory: Arc<dyn ApiClientFactory>,
    client: OnceCell<Arc<dyn ApiClient>>,
}

impl fmt::Debug for ToolDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDependencies")
            .field("client_initialized", &self.client.initialized())
            .finish_non_exhaustive()
    }
}

impl ToolDependencies {
    /// Creates a bundle whose client is built lazily by `factory`.
    #[must_use]
    pub fn lazy(factory: Arc<dyn ApiClientFactory>) -> Self {
        Self {
            factory,
            client: OnceCell::new(),
        }
    }

    /// Creates a bundle around an already constructed client.
    #[must_use]
    pub fn with_client(client: Arc<dyn ApiClient>) -> Self {
        Self::lazy(Arc::new(Prebuilt(client)))
    }

    /// Creates a bundle that fails every client request.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::lazy(Arc::new(Unconfigured))
    }

    /// Returns the shared client, constructing it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the factory error, typically [`ToolError::Client`].
    pub async fn client(&self) -> ToolResult<Arc<dyn ApiClient>> {
        let client = self
            .client
            .get_or_try_init(|| async {
                debug!("constructing API client");
                self.factory.create().await
            })
            .await?;
        Ok(Arc::clone(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    struct EchoClient;

    #[async_trait]
    impl ApiClient for EchoClient {
        async fn send(&self, request: ApiRequest) -> ToolResult<Value> {
            Ok(json!({ "path": request.path() }))
        }
    }

    struct CountingFactory {
        created: AtomicUsize,
    }

    #[async_trait]
    impl ApiClientFactory for CountingFactory {
        async fn create(&self) -> ToolResult<Arc<dyn ApiClient>> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(EchoClient))
        }
    }

    #[tokio::test]
    async fn client_is_built_once() {
        let factory = Arc::new(CountingFactory {
            created: AtomicUsize::new(0),
        });
        let deps = ToolDependencies::lazy(factory.clone());

        for _ in 0..3 {
            let client = deps.client().await.unwrap();
            let output = client.send(ApiRequest::get("/user")).await.unwrap();
            assert_eq!(output["path"], "/user");
        }
        assert_eq!(factory.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unconfigured_bundle_reports_client_error() {
        let deps = ToolDependencies::unconfigured();
        let err = deps.client().await.err().expect("client should fail");
        assert!(matches!(err, ToolError::Client { .. }));
    }

    #[test]
    fn request_builder_collects_query() {
        let pagination = CursorPagination::default();
        let request = ApiRequest::get("/orgs/octo/audit-log")
            .with_optional_query("phrase", Some("action:repo.create".into()))
            .with_optional_query("order", None)
            .with_pagination(&pagination);

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.query_value("phrase"), Some("action:repo.create"));
        assert_eq!(request.query_value("order"), None);
        assert_eq!(request.query_value("per_page"), Some("30"));
        assert_eq!(request.query_value("after"), None);
    }
}

//! Tool descriptors: declaration, annotations, and executable handlers.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use toolgate_primitives::{Scope, ScopeSet, ToolsetId};

use crate::args::Arguments;
use crate::client::ToolDependencies;
use crate::context::CallContext;
use crate::error::ToolResult;
use crate::toolset::ToolsetMetadata;

/// Behavioural hints advertised alongside a tool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    read_only_hint: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destructive_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    idempotent_hint: Option<bool>,
}

impl ToolAnnotations {
    /// Annotations for a tool that only reads remote state.
    #[must_use]
    pub fn read_only(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            read_only_hint: true,
            ..Self::default()
        }
    }

    /// Annotations for a tool that mutates remote state.
    #[must_use]
    pub fn write(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Marks the tool as destructive.
    #[must_use]
    pub fn destructive(mut self, destructive: bool) -> Self {
        self.destructive_hint = Some(destructive);
        self
    }

    /// Marks the tool as idempotent.
    #[must_use]
    pub fn idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent_hint = Some(idempotent);
        self
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns `true` when the tool does not modify remote state.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only_hint
    }

    /// Returns the destructive hint, if declared.
    #[must_use]
    pub const fn destructive_hint(&self) -> Option<bool> {
        self.destructive_hint
    }

    /// Returns the idempotent hint, if declared.
    #[must_use]
    pub const fn idempotent_hint(&self) -> Option<bool> {
        self.idempotent_hint
    }
}

/// Trait implemented by tool executors.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Invokes the tool with the call context, dependencies, and arguments.
    async fn call(
        &self,
        ctx: CallContext,
        deps: Arc<ToolDependencies>,
        args: Arguments,
    ) -> ToolResult<Value>;
}

#[async_trait]
impl<F, Fut> ToolHandler for F
where
    F: Send + Sync + Fn(CallContext, Arc<ToolDependencies>, Arguments) -> Fut,
    Fut: Future<Output = ToolResult<Value>> + Send,
{
    async fn call(
        &self,
        ctx: CallContext,
        deps: Arc<ToolDependencies>,
        args: Arguments,
    ) -> ToolResult<Value> {
        (self)(ctx, deps, args).await
    }
}

/// Immutable declaration of one invocable tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    toolset: ToolsetId,
    required_scopes: ScopeSet,
    input_schema: Value,
    output_schema: Option<Value>,
    annotations: ToolAnnotations,
    handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("toolset", &self.toolset)
            .field("required_scopes", &self.required_scopes)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

impl ToolDescriptor {
    /// Declares a tool belonging to `toolset`, executed by `handler`.
    ///
    /// The input schema defaults to an empty object schema.
    #[must_use]
    pub fn new<H>(toolset: &ToolsetMetadata, name: impl Into<String>, handler: H) -> Self
    where
        H: ToolHandler + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            toolset: toolset.id().clone(),
            required_scopes: ScopeSet::new(),
            input_schema: json!({ "type": "object", "properties": {} }),
            output_schema: None,
            annotations: ToolAnnotations::default(),
            handler: Arc::new(handler),
        }
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the JSON input schema.
    #[must_use]
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// Sets the JSON output schema.
    #[must_use]
    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Sets the behavioural annotations.
    #[must_use]
    pub fn with_annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Adds scopes the caller must hold to invoke the tool.
    #[must_use]
    pub fn with_required_scopes<I>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = Scope>,
    {
        for scope in scopes {
            self.required_scopes.insert(scope);
        }
        self
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning toolset identifier.
    #[must_use]
    pub fn toolset(&self) -> &ToolsetId {
        &self.toolset
    }

    /// Returns the scopes required for invocation.
    #[must_use]
    pub fn required_scopes(&self) -> &ScopeSet {
        &self.required_scopes
    }

    /// Returns the JSON input schema.
    #[must_use]
    pub fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    /// Returns the JSON output schema, if declared.
    #[must_use]
    pub fn output_schema(&self) -> Option<&Value> {
        self.output_schema.as_ref()
    }

    /// Returns the behavioural annotations.
    #[must_use]
    pub fn annotations(&self) -> &ToolAnnotations {
        &self.annotations
    }

    /// Returns `true` when the tool is annotated as read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.annotations.is_read_only()
    }

    /// Executes the underlying handler.
    ///
    /// # Errors
    ///
    /// Propagates whatever [`crate::ToolError`] the handler returns.
    pub async fn invoke(
        &self,
        ctx: CallContext,
        deps: Arc<ToolDependencies>,
        args: Arguments,
    ) -> ToolResult<Value> {
        self.handler.call(ctx, deps, args).await
    }
}

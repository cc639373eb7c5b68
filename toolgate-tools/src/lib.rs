//! Tool and toolset declarations for the toolgate registry.
//!
//! A tool is declared by a pure function taking a [`Translator`] and
//! returning a [`ToolDescriptor`]. Handlers receive a [`CallContext`], the
//! shared [`ToolDependencies`] bundle, and the raw [`Arguments`].

#![warn(missing_docs, clippy::pedantic)]

pub mod args;
pub mod client;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod pagination;
pub mod toolset;
pub mod translate;

pub use args::Arguments;
pub use client::{ApiClient, ApiClientFactory, ApiRequest, Method, ToolDependencies};
pub use context::{CallContext, ToolSummary, ToolsetDirectory, ToolsetSummary};
pub use descriptor::{ToolAnnotations, ToolDescriptor, ToolHandler};
pub use error::{ToolError, ToolResult};
pub use pagination::{CursorPagination, with_cursor_pagination};
pub use toolset::ToolsetMetadata;
pub use translate::{TranslationTable, Translator};

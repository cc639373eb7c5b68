//! Tool call dispatch.
//!
//! The [`Dispatcher`] looks a call up in the inventory, refuses it when the
//! owning toolset is disabled, the gateway runs read-only and the tool
//! writes, or the caller lacks a required scope, and otherwise runs the
//! handler. Every outcome is reported to an optional [`DispatchObserver`].

#![warn(missing_docs, clippy::pedantic)]

mod directory;
mod dispatcher;
mod error;
mod observer;

pub use directory::CatalogDirectory;
pub use dispatcher::{Dispatcher, DispatcherConfig, ToolCall};
pub use error::{DispatchError, DispatchResult};
pub use observer::{
    CompositeDispatchObserver, DispatchObserver, DispatchReport, TracingDispatchObserver,
};

//! Tool inventory and toolset enablement.
//!
//! [`InventoryBuilder`] validates the static declarations into an immutable
//! [`Inventory`]. [`resolve_toolsets`] expands a user request (`all`,
//! `default`, `dynamic`, explicit ids) into a [`ResolvedToolsets`], and
//! [`EnablementState`] holds the live enabled set, growing at runtime only
//! when dynamic discovery is active.

#![warn(missing_docs, clippy::pedantic)]

mod builder;
mod enablement;
mod error;
mod help;
mod inventory;
mod resolver;
mod state;

pub use builder::InventoryBuilder;
pub use enablement::{EnabledToolsets, EnablementState};
pub use error::{InventoryError, InventoryResult};
pub use help::toolsets_help;
pub use inventory::Inventory;
pub use resolver::{
    ResolvedToolsets, add_default_toolset, clean_tools, contains_toolset, expand_all_toolsets,
    remove_toolset, resolve_toolsets,
};
pub use state::{ToolsetEvent, ToolsetState};

//! Toolset-gated tool dispatch.
//!
//! Depend on this crate via `cargo add toolgate`. It bundles the internal
//! crates behind feature flags and provides [`Gateway`], which turns a
//! [`config::GatewayConfig`] into a ready [`kernel::Dispatcher`].

#![warn(missing_docs, clippy::pedantic)]

#[cfg(feature = "config")]
mod gateway;

#[cfg(feature = "config")]
pub use gateway::Gateway;

/// Re-export shared primitives for convenience.
pub use toolgate_primitives as primitives;

/// Tool and toolset declarations.
pub use toolgate_tools as tools;

/// Inventory, resolution, and enablement state.
pub use toolgate_inventory as inventory;

/// Call dispatch.
pub use toolgate_kernel as kernel;

/// GitHub-style catalog (enabled by `catalog` feature).
#[cfg(feature = "catalog")]
pub use toolgate_catalog as catalog;

/// Gateway configuration (enabled by `config` feature).
#[cfg(feature = "config")]
pub use toolgate_config as config;

/// Tracing setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use toolgate_telemetry as telemetry;

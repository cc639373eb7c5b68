//! Shared error definitions for registry primitives.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used by primitive constructors.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided call identifier could not be parsed.
    #[error("invalid call id: {source}")]
    InvalidCallId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },

    /// Scope failed validation.
    #[error("invalid scope `{scope}`: {reason}")]
    InvalidScope {
        /// The offending scope string.
        scope: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Toolset identifier failed validation.
    #[error("invalid toolset id `{id}`: {reason}")]
    InvalidToolsetId {
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}

//! Error types for the layout engine.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the layout engine.
///
/// Skipped and dropped items are normal layout outcomes and are reported in
/// [`Layout`](crate::Layout), never through this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A configuration value is non-finite or negative.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An item record cannot be interpreted.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

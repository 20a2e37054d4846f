//! Error types for the grid core.

use crate::store::StoreError;

/// Errors reported by grid operations.
///
/// Most interactions cannot fail: rejected page requests, malformed persisted
/// snapshots and failing store writes degrade silently (and are logged).
/// What remains are caller contract violations and explicit I/O requests.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A column position outside the current column sequence.
    #[error("column index {index} out of range for {len} columns")]
    InvalidIndex { index: usize, len: usize },

    /// A column key that is not part of the column sequence.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Page sizes must be positive.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// The persistence store failed.
    #[error("state store error: {0}")]
    Store(#[from] StoreError),

    /// A snapshot could not be serialized or parsed.
    #[error("snapshot error: {0}")]
    Snapshot(#[source] serde_json::Error),

    /// A configuration document could not be parsed.
    #[error("invalid {format} config: {message}")]
    Config {
        format: &'static str,
        message: String,
    },

    /// The row source failed to produce a page.
    #[error("row source error: {0}")]
    Source(String),
}

impl GridError {
    /// Create a row source error.
    pub fn row_source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

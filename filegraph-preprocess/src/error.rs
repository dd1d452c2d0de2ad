//! Error types for preprocessing.

use filegraph_hierarchy::HierarchyError;
use filegraph_oracle::OracleError;
use thiserror::Error;

/// Result type for preprocessing operations.
pub type PreprocessResult<T> = Result<T, PreprocessError>;

/// Errors that abort a preprocessing call. No partial request list is ever
/// returned alongside one of these.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// A lookup failed; the oracle's error is passed through as-is.
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// The hierarchy declaration was rejected.
    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// The batch is larger than the limit the caller configured.
    #[error("too many requests: {actual} exceeds limit of {limit}")]
    TooManyRequests { limit: usize, actual: usize },
}

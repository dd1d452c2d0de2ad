//! Error types for oracle lookups.

use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Failures raised by an oracle implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The backing store could not be reached.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// The backing store answered with an error.
    #[error("oracle backend error: {0}")]
    Backend(String),
}

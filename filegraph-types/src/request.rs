//! Graph-modification requests.
//!
//! A request is one operation applied to one target. The operation set is
//! closed: anything that dispatches on it matches exhaustively.

use crate::Target;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of an operation, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Delete,
    Relocate,
}

impl OperationKind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Delete => "delete",
            OperationKind::Relocate => "relocate",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation together with its parameters.
///
/// Two requests may only be consolidated when their operations compare
/// equal, so a relocation to group 8 never merges with one to group 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Delete the target and everything it owns.
    Delete,
    /// Move the target into another group.
    Relocate {
        /// Destination group id.
        group: i64,
    },
}

impl Operation {
    /// Returns the parameter-free kind of this operation.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Operation::Delete => OperationKind::Delete,
            Operation::Relocate { .. } => OperationKind::Relocate,
        }
    }

    /// Builds a request applying this operation to `target`.
    #[must_use]
    pub const fn on(self, target: Target) -> Request {
        Request { op: self, target }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Delete => write!(f, "{}", self.kind()),
            Operation::Relocate { group } => write!(f, "{}(group={group})", self.kind()),
        }
    }
}

/// A single client-issued modification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    #[serde(flatten)]
    pub op: Operation,
    pub target: Target,
}

impl Request {
    /// Creates a delete request.
    #[must_use]
    pub const fn delete(target: Target) -> Self {
        Operation::Delete.on(target)
    }

    /// Creates a relocate request moving `target` into `group`.
    #[must_use]
    pub const fn relocate(target: Target, group: i64) -> Self {
        Operation::Relocate { group }.on(target)
    }

    /// Whether this request may be consolidated with `other`.
    #[must_use]
    pub fn is_mergeable_with(&self, other: &Request) -> bool {
        self.op == other.op
    }

    /// The same operation aimed at a different target.
    #[must_use]
    pub const fn retarget(&self, target: Target) -> Self {
        self.op.on(target)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.target)
    }
}

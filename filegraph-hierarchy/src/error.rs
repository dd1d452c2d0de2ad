//! Error types for hierarchy declaration and loading.

use filegraph_types::EntityType;
use thiserror::Error;

/// Result type for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Construction-time errors. Any of these means the declared hierarchy is
/// unusable and no request may be preprocessed against it.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// A type declared as containing itself.
    #[error("{0} cannot contain itself")]
    SelfContainment(EntityType),

    /// The same edge declared twice.
    #[error("duplicate edge: {container} -> {member}")]
    DuplicateEdge {
        container: EntityType,
        member: EntityType,
    },

    /// The edges do not form a strict partial order.
    #[error("containment cycle through {0}")]
    Cycle(EntityType),

    /// A grouping relation that is not among the declared edges.
    #[error("grouping {container} -> {member} is not a declared edge")]
    UndeclaredGrouping {
        container: EntityType,
        member: EntityType,
    },

    /// A grouping relation declared twice.
    #[error("duplicate grouping: {container} -> {member}")]
    DuplicateGrouping {
        container: EntityType,
        member: EntityType,
    },

    /// The leaf of a grouping relation is itself declared as a container.
    #[error("grouped leaf {leaf} cannot contain {member}")]
    LeafHasMembers { leaf: EntityType, member: EntityType },

    /// Reading a hierarchy file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A hierarchy file could not be parsed.
    #[error("invalid hierarchy file: {0}")]
    Parse(#[from] toml::de::Error),
}

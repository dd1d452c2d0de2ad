//! Declared containment hierarchy for filegraph.
//!
//! Defines how entity types nest inside each other:
//! - [`HierarchyEdge`] — one `container ⊃ member` declaration
//! - [`Hierarchy`] — the validated edge set plus its grouping relations
//! - [`HierarchyConfig`] — the same declaration as loaded from TOML
//!
//! A hierarchy is validated exactly once, when it is built. Every structural
//! problem (cycles, duplicate or self-referencing edges, groupings that are
//! not declared edges) surfaces there as a [`HierarchyError`]; nothing
//! downstream re-checks the shape.

mod config;
mod edge;
mod error;
mod hierarchy;

pub use config::HierarchyConfig;
pub use edge::HierarchyEdge;
pub use error::{HierarchyError, HierarchyResult};
pub use hierarchy::Hierarchy;

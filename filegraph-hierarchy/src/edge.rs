use filegraph_types::EntityType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared containment relation: every `member` may sit inside a
/// `container`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HierarchyEdge {
    pub container: EntityType,
    pub member: EntityType,
}

impl HierarchyEdge {
    #[must_use]
    pub const fn new(container: EntityType, member: EntityType) -> Self {
        Self { container, member }
    }

    /// The edges of the default imaging model.
    pub(crate) fn imaging_edges() -> Vec<HierarchyEdge> {
        use EntityType::*;
        vec![
            Self::new(Project, Dataset),
            Self::new(Dataset, Image),
            Self::new(Screen, Plate),
            Self::new(Plate, Well),
            Self::new(Well, Image),
            Self::new(Fileset, Image),
        ]
    }

    /// The grouping relations of the default imaging model.
    pub(crate) fn imaging_groupings() -> Vec<HierarchyEdge> {
        vec![Self::new(EntityType::Fileset, EntityType::Image)]
    }
}

impl fmt::Display for HierarchyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.container, self.member)
    }
}

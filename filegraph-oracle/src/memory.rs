//! Map-backed oracle.

use crate::{HierarchyOracle, OracleResult};
use filegraph_types::{EntityType, Target};
use std::collections::{BTreeSet, HashMap};

/// An oracle that answers from explicitly registered `container ⊃ member`
/// links, in both directions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOracle {
    members: HashMap<Target, BTreeSet<Target>>,
    containers: HashMap<Target, BTreeSet<Target>>,
}

impl InMemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `member` sits inside `container`.
    pub fn link(&mut self, container: Target, member: Target) {
        self.members.entry(container).or_default().insert(member);
        self.containers.entry(member).or_default().insert(container);
    }

    /// Records every target in `members` as inside `container`.
    pub fn link_all(&mut self, container: Target, members: impl IntoIterator<Item = Target>) {
        for member in members {
            self.link(container, member);
        }
    }

    /// Builder form of [`link`](Self::link).
    #[must_use]
    pub fn with_link(mut self, container: Target, member: Target) -> Self {
        self.link(container, member);
        self
    }

    /// Builder form of [`link_all`](Self::link_all).
    #[must_use]
    pub fn with_links(mut self, container: Target, members: impl IntoIterator<Item = Target>) -> Self {
        self.link_all(container, members);
        self
    }
}

impl HierarchyOracle for InMemoryOracle {
    fn lookup(&self, target_type: EntityType, from: &Target) -> OracleResult<BTreeSet<Target>> {
        let down = self.members.get(from).into_iter().flatten();
        let up = self.containers.get(from).into_iter().flatten();
        Ok(down
            .chain(up)
            .filter(|t| t.entity_type == target_type)
            .copied()
            .collect())
    }
}

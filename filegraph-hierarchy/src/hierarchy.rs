use crate::{HierarchyEdge, HierarchyError, HierarchyResult};
use filegraph_types::EntityType;
use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graphmap::DiGraphMap;
use std::collections::HashSet;
use tracing::debug;

/// A validated containment hierarchy.
///
/// Holds the declared edges, the subset of them that are *grouping*
/// relations (a physical storage unit and the leaves it holds), and a
/// topological order of every type that appears in an edge, containers
/// before their members.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    edges: Vec<HierarchyEdge>,
    groupings: Vec<HierarchyEdge>,
    graph: DiGraphMap<EntityType, ()>,
    order: Vec<EntityType>,
}

impl Hierarchy {
    /// Validates and builds a hierarchy.
    ///
    /// Groupings are kept in the order given; that is the order in which
    /// the preprocessor runs its passes.
    pub fn new(
        edges: impl IntoIterator<Item = HierarchyEdge>,
        groupings: impl IntoIterator<Item = HierarchyEdge>,
    ) -> HierarchyResult<Self> {
        let edges: Vec<HierarchyEdge> = edges.into_iter().collect();
        let groupings: Vec<HierarchyEdge> = groupings.into_iter().collect();

        let mut seen = HashSet::new();
        let mut graph = DiGraphMap::new();
        for edge in &edges {
            if edge.container == edge.member {
                return Err(HierarchyError::SelfContainment(edge.container));
            }
            if !seen.insert(*edge) {
                return Err(HierarchyError::DuplicateEdge {
                    container: edge.container,
                    member: edge.member,
                });
            }
            graph.add_edge(edge.container, edge.member, ());
        }

        let order = toposort(&graph, None).map_err(|cycle| HierarchyError::Cycle(cycle.node_id()))?;

        let mut seen_groupings = HashSet::new();
        for grouping in &groupings {
            if !seen.contains(grouping) {
                return Err(HierarchyError::UndeclaredGrouping {
                    container: grouping.container,
                    member: grouping.member,
                });
            }
            if !seen_groupings.insert(*grouping) {
                return Err(HierarchyError::DuplicateGrouping {
                    container: grouping.container,
                    member: grouping.member,
                });
            }
        }

        let hierarchy = Self {
            edges,
            groupings,
            graph,
            order,
        };
        for grouping in &hierarchy.groupings {
            if let Some(member) = hierarchy.members_of(grouping.member).next() {
                return Err(HierarchyError::LeafHasMembers {
                    leaf: grouping.member,
                    member,
                });
            }
        }

        debug!(
            "Validated hierarchy: {} edges, {} groupings, order {:?}",
            hierarchy.edges.len(),
            hierarchy.groupings.len(),
            hierarchy.order
        );
        Ok(hierarchy)
    }

    /// The default imaging model: Project ⊃ Dataset ⊃ Image,
    /// Screen ⊃ Plate ⊃ Well ⊃ Image, grouped by Fileset ⊃ Image.
    #[must_use]
    pub fn imaging() -> Self {
        Self::new(
            HierarchyEdge::imaging_edges(),
            HierarchyEdge::imaging_groupings(),
        )
        .expect("built-in imaging hierarchy is valid")
    }

    /// All declared edges, in declaration order.
    pub fn edges(&self) -> &[HierarchyEdge] {
        &self.edges
    }

    /// The grouping relations, in processing order.
    pub fn groupings(&self) -> &[HierarchyEdge] {
        &self.groupings
    }

    /// Every type that takes part in at least one edge, containers first.
    pub fn topological_order(&self) -> &[EntityType] {
        &self.order
    }

    /// Types directly contained by `container`.
    pub fn members_of(&self, container: EntityType) -> impl Iterator<Item = EntityType> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.container == container)
            .map(|e| e.member)
    }

    /// Whether `ancestor` transitively contains `descendant`. A type never
    /// reaches itself.
    #[must_use]
    pub fn reaches(&self, ancestor: EntityType, descendant: EntityType) -> bool {
        ancestor != descendant
            && self.graph.contains_node(ancestor)
            && self.graph.contains_node(descendant)
            && has_path_connecting(&self.graph, ancestor, descendant, None)
    }

    /// The edges that must be walked to resolve any container down to the
    /// leaves of `grouping`: every edge lying on a path that ends at the
    /// grouping's leaf, ordered so an edge's container is always resolved
    /// before any edge it feeds.
    pub fn expansion_edges(&self, grouping: &HierarchyEdge) -> Vec<HierarchyEdge> {
        let leaf = grouping.member;
        let mut edges: Vec<HierarchyEdge> = self
            .edges
            .iter()
            .copied()
            .filter(|e| e.member == leaf || self.reaches(e.member, leaf))
            .collect();
        edges.sort_by_key(|e| self.position(e.container));
        edges
    }

    fn position(&self, entity_type: EntityType) -> usize {
        self.order
            .iter()
            .position(|t| *t == entity_type)
            .unwrap_or(self.order.len())
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::imaging()
    }
}

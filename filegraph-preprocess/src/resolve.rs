//! Batched resolution of request targets to grouped leaves.
//!
//! Everything one grouping pass needs from the oracle is fetched here, up
//! front, one member type at a time: each `prepare_lookups` call carries
//! every source that can hold that type. The scan that follows never
//! touches the oracle.

use filegraph_hierarchy::{Hierarchy, HierarchyEdge};
use filegraph_oracle::{LookupCache, OracleResult};
use filegraph_types::{EntityType, Request, Target};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Leaf coverage facts for one grouping relation, limited to what the
/// current request list can reach.
#[derive(Debug, Default)]
pub(crate) struct Resolution {
    /// Leaves transitively inside each container target.
    leaves: HashMap<Target, BTreeSet<Target>>,
    /// Grouping containers holding each touched leaf.
    groups_of: HashMap<Target, BTreeSet<Target>>,
    /// Full leaf membership of each grouping container seen.
    members: HashMap<Target, BTreeSet<Target>>,
}

impl Resolution {
    /// Leaves implied by a request on `target`: the target itself if it is
    /// a leaf, its transitive leaves if it is a container, nothing otherwise.
    pub(crate) fn leaves_of(&self, target: &Target, leaf_type: EntityType) -> BTreeSet<Target> {
        if target.entity_type == leaf_type {
            return BTreeSet::from([*target]);
        }
        self.leaves.get(target).cloned().unwrap_or_default()
    }

    /// Grouping containers that hold `leaf`.
    pub(crate) fn groups_of(&self, leaf: &Target) -> impl Iterator<Item = &Target> {
        self.groups_of.get(leaf).into_iter().flatten()
    }

    /// Whether every member of `group` is in `touched`. A group with no
    /// known members is never covered.
    pub(crate) fn is_covered(&self, group: &Target, touched: &HashSet<Target>) -> bool {
        match self.members.get(group) {
            Some(members) if !members.is_empty() => members.iter().all(|m| touched.contains(m)),
            _ => false,
        }
    }
}

/// Resolves every target in `requests` against `grouping`.
pub(crate) fn resolve(
    hierarchy: &Hierarchy,
    grouping: &HierarchyEdge,
    cache: &mut LookupCache<'_>,
    requests: &[Request],
) -> OracleResult<Resolution> {
    let leaf_type = grouping.member;
    let expansion = hierarchy.expansion_edges(grouping);
    let expands = |t: EntityType| expansion.iter().any(|e| e.container == t);

    let mut touched: BTreeSet<Target> = BTreeSet::new();
    let mut frontier: HashMap<EntityType, BTreeSet<Target>> = HashMap::new();
    for request in requests {
        let target = request.target;
        if target.entity_type == leaf_type {
            touched.insert(target);
        } else if expands(target.entity_type) {
            frontier.entry(target.entity_type).or_default().insert(target);
        }
    }

    // Walk down, one batch per member type. Every container of a type
    // precedes it in topological order, so by the time a member type comes
    // up all of its sources are known.
    let order = hierarchy.topological_order();
    for member_type in order {
        let sources: BTreeSet<Target> = expansion
            .iter()
            .filter(|e| e.member == *member_type)
            .filter_map(|e| frontier.get(&e.container))
            .flatten()
            .copied()
            .collect();
        if sources.is_empty() {
            continue;
        }
        cache.prefetch(*member_type, &sources)?;
        if *member_type == leaf_type {
            continue;
        }
        let mut found = BTreeSet::new();
        for source in &sources {
            found.extend(cache.get(*member_type, source)?.iter().copied());
        }
        if !found.is_empty() {
            frontier.entry(*member_type).or_default().extend(found);
        }
    }

    // Fold leaves back up, members before containers.
    let mut resolution = Resolution::default();
    for container_type in order.iter().rev() {
        let Some(sources) = frontier.get(container_type) else {
            continue;
        };
        for source in sources {
            let mut below = BTreeSet::new();
            for edge in expansion.iter().filter(|e| e.container == *container_type) {
                for child in cache.cached(edge.member, source).into_iter().flatten() {
                    if child.entity_type == leaf_type {
                        below.insert(*child);
                    } else if let Some(leaves) = resolution.leaves.get(child) {
                        below.extend(leaves.iter().copied());
                    }
                }
            }
            resolution.leaves.insert(*source, below);
        }
    }

    for request in requests {
        if let Some(leaves) = resolution.leaves.get(&request.target) {
            touched.extend(leaves.iter().copied());
        }
    }

    // Which grouping containers hold the touched leaves, and what else
    // they hold.
    cache.prefetch(grouping.container, &touched)?;
    let mut groups: BTreeSet<Target> = requests
        .iter()
        .map(|r| r.target)
        .filter(|t| t.entity_type == grouping.container)
        .collect();
    for leaf in &touched {
        let containers = cache.get(grouping.container, leaf)?.clone();
        groups.extend(containers.iter().copied());
        resolution.groups_of.insert(*leaf, containers);
    }

    cache.prefetch(leaf_type, &groups)?;
    for group in &groups {
        let members = cache.get(leaf_type, group)?.clone();
        resolution.members.insert(*group, members);
    }

    debug!(
        "Resolved {} grouping: {} containers expanded, {} leaves, {} groups",
        grouping,
        resolution.leaves.len(),
        touched.len(),
        groups.len()
    );
    Ok(resolution)
}

use filegraph_hierarchy::{Hierarchy, HierarchyEdge, HierarchyError};
use filegraph_types::EntityType::{self, *};
use pretty_assertions::assert_eq;

fn edge(container: EntityType, member: EntityType) -> HierarchyEdge {
    HierarchyEdge::new(container, member)
}

fn position(h: &Hierarchy, t: EntityType) -> usize {
    h.topological_order().iter().position(|x| *x == t).unwrap()
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn imaging_hierarchy_is_valid() {
    let h = Hierarchy::imaging();
    assert_eq!(h.edges().len(), 6);
    assert_eq!(h.groupings(), &[edge(Fileset, Image)]);
}

#[test]
fn rejects_self_containment() {
    let err = Hierarchy::new(vec![edge(Dataset, Dataset)], vec![]).unwrap_err();
    assert!(matches!(err, HierarchyError::SelfContainment(Dataset)));
}

#[test]
fn rejects_duplicate_edge() {
    let err = Hierarchy::new(vec![edge(Dataset, Image), edge(Dataset, Image)], vec![]).unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::DuplicateEdge { container: Dataset, member: Image }
    ));
}

#[test]
fn rejects_two_node_cycle() {
    let err = Hierarchy::new(vec![edge(Dataset, Image), edge(Image, Dataset)], vec![]).unwrap_err();
    assert!(matches!(err, HierarchyError::Cycle(_)));
}

#[test]
fn rejects_type_that_is_both_ancestor_and_descendant() {
    let edges = vec![edge(Screen, Plate), edge(Plate, Well), edge(Well, Screen)];
    let err = Hierarchy::new(edges, vec![]).unwrap_err();
    assert!(matches!(err, HierarchyError::Cycle(_)));
}

#[test]
fn rejects_undeclared_grouping() {
    let err = Hierarchy::new(vec![edge(Dataset, Image)], vec![edge(Fileset, Image)]).unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::UndeclaredGrouping { container: Fileset, member: Image }
    ));
}

#[test]
fn rejects_duplicate_grouping() {
    let err = Hierarchy::new(
        vec![edge(Fileset, Image)],
        vec![edge(Fileset, Image), edge(Fileset, Image)],
    )
    .unwrap_err();
    assert!(matches!(err, HierarchyError::DuplicateGrouping { .. }));
}

#[test]
fn rejects_grouped_leaf_with_members() {
    let err = Hierarchy::new(
        vec![edge(Plate, Well), edge(Well, Image)],
        vec![edge(Plate, Well)],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::LeafHasMembers { leaf: Well, member: Image }
    ));
}

#[test]
fn shared_member_is_not_ambiguous() {
    // Image sits in Dataset, Well and Fileset at once; that is a DAG, not a cycle.
    let h = Hierarchy::new(
        vec![edge(Dataset, Image), edge(Well, Image), edge(Fileset, Image)],
        vec![edge(Fileset, Image)],
    );
    assert!(h.is_ok());
}

#[test]
fn error_messages() {
    let err = Hierarchy::new(vec![edge(Well, Well)], vec![]).unwrap_err();
    assert_eq!(err.to_string(), "Well cannot contain itself");
}

// ── Queries ──────────────────────────────────────────────────────

#[test]
fn topological_order_puts_containers_first() {
    let h = Hierarchy::imaging();
    for e in h.edges() {
        assert!(position(&h, e.container) < position(&h, e.member), "{e}");
    }
}

#[test]
fn direct_members() {
    let h = Hierarchy::imaging();
    assert_eq!(h.members_of(Plate).collect::<Vec<_>>(), vec![Well]);
    assert_eq!(h.members_of(Image).count(), 0);
}

#[test]
fn reaches_is_transitive_and_strict() {
    let h = Hierarchy::imaging();
    assert!(h.reaches(Screen, Image));
    assert!(h.reaches(Project, Image));
    assert!(!h.reaches(Image, Screen));
    assert!(!h.reaches(Image, Image));
    assert!(!h.reaches(Project, Well));
}

#[test]
fn expansion_edges_cover_every_path_to_the_leaf() {
    let h = Hierarchy::imaging();
    let edges = h.expansion_edges(&edge(Fileset, Image));
    assert_eq!(edges.len(), 6);
    for (i, e) in edges.iter().enumerate() {
        for later in &edges[i + 1..] {
            assert!(
                !h.reaches(later.container, e.container),
                "{later} must not precede {e}"
            );
        }
    }
}

#[test]
fn expansion_edges_skip_unrelated_branches() {
    let h = Hierarchy::new(
        vec![
            edge(Project, Dataset),
            edge(Dataset, Image),
            edge(Screen, Plate),
            edge(Fileset, Image),
        ],
        vec![edge(Fileset, Image)],
    )
    .unwrap();
    let edges = h.expansion_edges(&edge(Fileset, Image));
    assert!(!edges.contains(&edge(Screen, Plate)));
    assert!(edges.contains(&edge(Project, Dataset)));
}

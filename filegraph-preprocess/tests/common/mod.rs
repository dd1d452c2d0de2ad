//! Shared fixtures for preprocessor tests.

#![allow(dead_code)]

use filegraph_oracle::{HierarchyOracle, InMemoryOracle, OracleError, OracleResult};
use filegraph_types::{EntityType, Target};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

pub const FILESET_A: Target = Target::fileset(1);
pub const FILESET_B: Target = Target::fileset(2);
pub const FILESET_C: Target = Target::fileset(3);

/// Images 0..=6 where A = {0}, B = {1, 2}, C = {3, 4, 5} and image 6 is in
/// no fileset. Dataset 1 holds images 0 and 1. Wells 0 and 1 hold images 0
/// and 1 respectively, both on plate 1 of screen 1. Project 1 holds
/// dataset 1.
pub fn imaging_oracle() -> InMemoryOracle {
    InMemoryOracle::new()
        .with_links(FILESET_A, [Target::image(0)])
        .with_links(FILESET_B, [Target::image(1), Target::image(2)])
        .with_links(FILESET_C, [Target::image(3), Target::image(4), Target::image(5)])
        .with_links(Target::dataset(1), [Target::image(0), Target::image(1)])
        .with_link(Target::project(1), Target::dataset(1))
        .with_link(Target::well(0), Target::image(0))
        .with_link(Target::well(1), Target::image(1))
        .with_links(Target::plate(1), [Target::well(0), Target::well(1)])
        .with_link(Target::screen(1), Target::plate(1))
}

pub fn images(ids: impl IntoIterator<Item = i64>) -> Vec<Target> {
    ids.into_iter().map(Target::image).collect()
}

/// Records every call before delegating.
pub struct Recording<O> {
    pub inner: O,
    pub prepared: RefCell<Vec<(EntityType, BTreeSet<Target>)>>,
    pub lookups: Cell<usize>,
}

impl<O> Recording<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            prepared: RefCell::new(Vec::new()),
            lookups: Cell::new(0),
        }
    }

    pub fn prepared_for(&self, entity_type: EntityType) -> Vec<BTreeSet<Target>> {
        self.prepared
            .borrow()
            .iter()
            .filter(|(t, _)| *t == entity_type)
            .map(|(_, sources)| sources.clone())
            .collect()
    }
}

impl<O: HierarchyOracle> HierarchyOracle for Recording<O> {
    fn prepare_lookups(&self, target_type: EntityType, from: &BTreeSet<Target>) -> OracleResult<()> {
        self.prepared.borrow_mut().push((target_type, from.clone()));
        self.inner.prepare_lookups(target_type, from)
    }

    fn lookup(&self, target_type: EntityType, from: &Target) -> OracleResult<BTreeSet<Target>> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.lookup(target_type, from)
    }
}

/// Answers the first `budget` lookups from `inner`, then fails.
pub struct FailAfter<O> {
    pub inner: O,
    pub budget: Cell<usize>,
}

impl<O> FailAfter<O> {
    pub fn new(inner: O, budget: usize) -> Self {
        Self {
            inner,
            budget: Cell::new(budget),
        }
    }
}

impl<O: HierarchyOracle> HierarchyOracle for FailAfter<O> {
    fn lookup(&self, target_type: EntityType, from: &Target) -> OracleResult<BTreeSet<Target>> {
        match self.budget.get() {
            0 => Err(OracleError::Unavailable("database offline".into())),
            n => {
                self.budget.set(n - 1);
                self.inner.lookup(target_type, from)
            }
        }
    }
}

/// Installs a test subscriber so `RUST_LOG=debug` shows engine traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

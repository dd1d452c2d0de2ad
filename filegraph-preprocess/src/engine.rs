//! The preprocessing engine.

use crate::resolve::{resolve, Resolution};
use crate::{PreprocessConfig, PreprocessError, PreprocessResult};
use filegraph_hierarchy::{Hierarchy, HierarchyConfig, HierarchyEdge};
use filegraph_oracle::{HierarchyOracle, LookupCache, LookupStats, OracleResult};
use filegraph_types::{Operation, Request, Target};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

/// Outcome of one preprocessing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessReport {
    /// The rewritten request list.
    pub requests: Vec<Request>,
    /// Grouping-container requests added.
    pub synthesized: usize,
    /// Leaf requests dropped because a grouping-container request covers them.
    pub elided: usize,
    /// Oracle traffic for the call.
    pub lookups: LookupStats,
}

/// Rewrites request batches so every grouping container is acted on whole.
///
/// Holds only the validated hierarchy and configuration; all per-call state
/// lives on the stack of [`process`](Self::process), so one preprocessor can
/// serve any number of calls.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    hierarchy: Hierarchy,
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Creates a preprocessor with the default configuration.
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self::with_config(hierarchy, PreprocessConfig::default())
    }

    /// Creates a preprocessor with a custom configuration.
    pub fn with_config(hierarchy: Hierarchy, config: PreprocessConfig) -> Self {
        Self { hierarchy, config }
    }

    /// Validates a hierarchy declaration and builds a preprocessor on it.
    pub fn from_declaration(
        declaration: HierarchyConfig,
        config: PreprocessConfig,
    ) -> PreprocessResult<Self> {
        Ok(Self::with_config(declaration.into_hierarchy()?, config))
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Rewrites `requests`, returning the new list.
    pub fn process(
        &self,
        oracle: &dyn HierarchyOracle,
        requests: &[Request],
    ) -> PreprocessResult<Vec<Request>> {
        Ok(self.process_with_report(oracle, requests)?.requests)
    }

    /// Rewrites `requests` and reports what changed.
    ///
    /// Grouping relations run in declaration order, each pass consuming the
    /// previous pass's output. An oracle failure in any pass aborts the call.
    pub fn process_with_report(
        &self,
        oracle: &dyn HierarchyOracle,
        requests: &[Request],
    ) -> PreprocessResult<PreprocessReport> {
        if let Some(limit) = self.config.max_requests
            && requests.len() > limit
        {
            return Err(PreprocessError::TooManyRequests {
                limit,
                actual: requests.len(),
            });
        }

        let mut cache = LookupCache::new(oracle);
        let mut current = requests.to_vec();
        let mut synthesized = 0;
        let mut elided = 0;

        for grouping in self.hierarchy.groupings() {
            let pass = self.run_pass(grouping, &mut cache, &current)?;
            synthesized += pass.synthesized;
            elided += pass.elided;
            current = pass.requests;
        }

        let lookups = cache.stats();
        info!(
            "Preprocessed {} requests into {} ({} synthesized, {} elided, {} oracle lookups)",
            requests.len(),
            current.len(),
            synthesized,
            elided,
            lookups.lookup_calls
        );

        Ok(PreprocessReport {
            requests: current,
            synthesized,
            elided,
            lookups,
        })
    }

    fn run_pass(
        &self,
        grouping: &HierarchyEdge,
        cache: &mut LookupCache<'_>,
        requests: &[Request],
    ) -> OracleResult<PassOutcome> {
        let resolution = resolve(&self.hierarchy, grouping, cache, requests)?;
        Ok(Scan::new(grouping, &resolution).run(requests))
    }
}

struct PassOutcome {
    requests: Vec<Request>,
    synthesized: usize,
    elided: usize,
}

/// A request's place in the output, decided during the scan.
enum Slot {
    /// Carries its own effect; always kept.
    Kept(Request),
    /// A leaf request; dropped if its grouping container ends up represented.
    Leaf(Request),
    /// Added to cover a grouping container.
    Synthesized(Request),
}

/// Coverage state for one distinct operation.
#[derive(Default)]
struct OperationState {
    touched: HashSet<Target>,
    /// Grouping containers already carrying a request of this operation.
    represented: BTreeSet<Target>,
}

/// Single left-to-right scan for one grouping relation.
struct Scan<'a> {
    grouping: &'a HierarchyEdge,
    resolution: &'a Resolution,
    states: HashMap<Operation, OperationState>,
}

impl<'a> Scan<'a> {
    fn new(grouping: &'a HierarchyEdge, resolution: &'a Resolution) -> Self {
        Self {
            grouping,
            resolution,
            states: HashMap::new(),
        }
    }

    fn run(mut self, requests: &[Request]) -> PassOutcome {
        // Containers the client asked for directly are never synthesized a
        // second time, wherever in the list they appear.
        for request in requests {
            if request.target.entity_type == self.grouping.container {
                self.state(request.op).represented.insert(request.target);
            }
        }

        let mut slots = Vec::with_capacity(requests.len());
        for request in requests {
            let leaf_request = request.target.entity_type == self.grouping.member;
            slots.push(if leaf_request {
                Slot::Leaf(*request)
            } else {
                Slot::Kept(*request)
            });

            for container in self.fold(request) {
                let synthesized = request.retarget(container);
                debug_assert!(synthesized.is_mergeable_with(request));
                debug!("Synthesizing {} after {}", synthesized, request);
                slots.push(Slot::Synthesized(synthesized));
            }
        }

        self.assemble(slots)
    }

    /// Adds the request's leaves to its operation's coverage and returns the
    /// grouping containers it completed, in target order.
    fn fold(&mut self, request: &Request) -> BTreeSet<Target> {
        let resolution = self.resolution;
        let leaves = resolution.leaves_of(&request.target, self.grouping.member);
        let state = self.state(request.op);

        let mut completed = BTreeSet::new();
        for leaf in leaves {
            if !state.touched.insert(leaf) {
                continue;
            }
            for group in resolution.groups_of(&leaf) {
                if !state.represented.contains(group) && resolution.is_covered(group, &state.touched) {
                    completed.insert(*group);
                }
            }
        }
        state.represented.extend(completed.iter().copied());
        completed
    }

    fn assemble(self, slots: Vec<Slot>) -> PassOutcome {
        let mut requests = Vec::with_capacity(slots.len());
        let mut synthesized = 0;
        let mut elided = 0;

        for slot in slots {
            match slot {
                Slot::Kept(request) => requests.push(request),
                Slot::Synthesized(request) => {
                    synthesized += 1;
                    requests.push(request);
                }
                Slot::Leaf(request) => {
                    if self.is_subsumed(&request) {
                        debug!("Eliding {}", request);
                        elided += 1;
                    } else {
                        requests.push(request);
                    }
                }
            }
        }

        PassOutcome {
            requests,
            synthesized,
            elided,
        }
    }

    fn is_subsumed(&self, request: &Request) -> bool {
        let Some(state) = self.states.get(&request.op) else {
            return false;
        };
        self.resolution
            .groups_of(&request.target)
            .any(|group| state.represented.contains(group))
    }

    fn state(&mut self, op: Operation) -> &mut OperationState {
        self.states.entry(op).or_default()
    }
}

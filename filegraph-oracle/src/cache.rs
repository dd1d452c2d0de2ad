//! Call-scoped lookup cache.

use crate::{HierarchyOracle, OracleResult};
use filegraph_types::{EntityType, Target};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Round-trip counters for one cache's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupStats {
    /// Calls to [`HierarchyOracle::prepare_lookups`].
    pub prepare_calls: usize,
    /// Calls to [`HierarchyOracle::lookup`].
    pub lookup_calls: usize,
    /// Lookups answered without asking the oracle.
    pub cache_hits: usize,
}

/// Memoizes oracle answers keyed by `(target type, source)`.
///
/// One cache is created per preprocessing call and dropped when the call
/// returns.
pub struct LookupCache<'o> {
    oracle: &'o dyn HierarchyOracle,
    entries: HashMap<(EntityType, Target), BTreeSet<Target>>,
    stats: LookupStats,
}

impl<'o> LookupCache<'o> {
    /// Creates an empty cache in front of `oracle`.
    pub fn new(oracle: &'o dyn HierarchyOracle) -> Self {
        Self {
            oracle,
            entries: HashMap::new(),
            stats: LookupStats::default(),
        }
    }

    /// Fetches `target_type` relations for every source not already cached.
    ///
    /// The oracle is primed once with the whole missing set before any
    /// individual lookup is issued. Sources already cached are skipped, and
    /// if none are missing the oracle is not called at all.
    pub fn prefetch(&mut self, target_type: EntityType, sources: &BTreeSet<Target>) -> OracleResult<()> {
        let missing: BTreeSet<Target> = sources
            .iter()
            .filter(|s| !self.entries.contains_key(&(target_type, **s)))
            .copied()
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        debug!("Prefetching {} for {} sources", target_type, missing.len());
        self.oracle.prepare_lookups(target_type, &missing)?;
        self.stats.prepare_calls += 1;

        for source in missing {
            let found = self.oracle.lookup(target_type, &source)?;
            self.stats.lookup_calls += 1;
            self.entries.insert((target_type, source), found);
        }
        Ok(())
    }

    /// Returns the `target_type` relations of `from`, asking the oracle only
    /// on a miss.
    pub fn get(&mut self, target_type: EntityType, from: &Target) -> OracleResult<&BTreeSet<Target>> {
        let key = (target_type, *from);
        if self.entries.contains_key(&key) {
            self.stats.cache_hits += 1;
        } else {
            let found = self.oracle.lookup(target_type, from)?;
            self.stats.lookup_calls += 1;
            self.entries.insert(key, found);
        }
        Ok(&self.entries[&key])
    }

    /// Returns a cached answer without touching the oracle.
    pub fn cached(&self, target_type: EntityType, from: &Target) -> Option<&BTreeSet<Target>> {
        self.entries.get(&(target_type, *from))
    }

    /// Number of cached `(type, source)` entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> LookupStats {
        self.stats
    }
}

impl std::fmt::Debug for LookupCache<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupCache")
            .field("entries", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}

//! Containment lookups for filegraph.
//!
//! The preprocessor never reads storage itself. Everything it needs to know
//! about which entity sits inside which comes through a [`HierarchyOracle`],
//! supplied by the surrounding system and usually backed by a database.
//!
//! # Architecture
//!
//! - [`HierarchyOracle`] is the collaborator seam: batch priming plus
//!   single-target lookups in either direction of an edge
//! - [`LookupCache`] wraps an oracle for exactly one preprocessing call and
//!   is dropped with it, so nothing learned for one client's batch is ever
//!   served to another
//! - [`InMemoryOracle`] answers from explicit links, for tests and for
//!   callers that already hold the graph in memory

mod cache;
mod error;
mod memory;

pub use cache::{LookupCache, LookupStats};
pub use error::{OracleError, OracleResult};
pub use memory::InMemoryOracle;

use filegraph_types::{EntityType, Target};
use std::collections::BTreeSet;

/// Answers containment queries over the entity graph.
///
/// The direction of a lookup is implied by the declared hierarchy: asking
/// an image for `Fileset` returns the filesets that contain it, asking a
/// fileset for `Image` returns the images it holds.
pub trait HierarchyOracle {
    /// Primes the oracle for lookups of `target_type` from every target in
    /// `from`, so it can fetch them in one round trip.
    ///
    /// The return value carries no data; only failure is meaningful.
    fn prepare_lookups(&self, target_type: EntityType, from: &BTreeSet<Target>) -> OracleResult<()> {
        let _ = (target_type, from);
        Ok(())
    }

    /// Every entity of `target_type` that contains or is contained by `from`.
    ///
    /// Unknown targets, and types with no relation to `from`, yield an empty
    /// set rather than an error.
    fn lookup(&self, target_type: EntityType, from: &Target) -> OracleResult<BTreeSet<Target>>;
}

//! Hierarchy declaration loaded from `hierarchy.toml`.
//!
//! ```toml
//! [[edges]]
//! container = "project"
//! member = "dataset"
//!
//! [[groupings]]
//! container = "fileset"
//! member = "image"
//! ```
//!
//! A missing section falls back to the imaging defaults for that section.
//! A missing file falls back entirely to the imaging model. A file that is
//! present but malformed is an error: preprocessing must never run against a
//! hierarchy that was only half understood.

use crate::{Hierarchy, HierarchyEdge, HierarchyResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Edge and grouping declarations, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default = "HierarchyEdge::imaging_edges")]
    pub edges: Vec<HierarchyEdge>,
    #[serde(default = "HierarchyEdge::imaging_groupings")]
    pub groupings: Vec<HierarchyEdge>,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            edges: HierarchyEdge::imaging_edges(),
            groupings: HierarchyEdge::imaging_groupings(),
        }
    }
}

impl HierarchyConfig {
    /// Parses a declaration from TOML text.
    pub fn from_toml_str(contents: &str) -> HierarchyResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads a declaration from `path`, or the imaging defaults if the file
    /// does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> HierarchyResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No hierarchy file found at {:?}, using the imaging model", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            "Loaded hierarchy from {:?} ({} edges, {} groupings)",
            path,
            config.edges.len(),
            config.groupings.len()
        );
        Ok(config)
    }

    /// Validates the declaration.
    pub fn into_hierarchy(self) -> HierarchyResult<Hierarchy> {
        Hierarchy::new(self.edges, self.groupings)
    }
}

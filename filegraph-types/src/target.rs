//! Entity types and the targets that reference them.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of entity types a request may address.
///
/// Declaration order is the `Ord` order, which keeps synthesized output
/// deterministic when several targets are emitted at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    Dataset,
    Screen,
    Plate,
    Well,
    Image,
    Fileset,
}

impl EntityType {
    /// Every entity type, in declaration order.
    pub const ALL: [EntityType; 7] = [
        EntityType::Project,
        EntityType::Dataset,
        EntityType::Screen,
        EntityType::Plate,
        EntityType::Well,
        EntityType::Image,
        EntityType::Fileset,
    ];

    /// The canonical name, as used in `Display` and configuration files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityType::Project => "Project",
            EntityType::Dataset => "Dataset",
            EntityType::Screen => "Screen",
            EntityType::Plate => "Plate",
            EntityType::Well => "Well",
            EntityType::Image => "Image",
            EntityType::Fileset => "Fileset",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    /// Accepts the canonical name in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownEntityType(s.to_string()))
    }
}

/// A reference to one entity: its type and numeric id.
///
/// Purely a key into the oracle's domain; holding a target says nothing
/// about whether the entity exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target {
    pub entity_type: EntityType,
    pub id: i64,
}

impl Target {
    /// Creates a target.
    #[must_use]
    pub const fn new(entity_type: EntityType, id: i64) -> Self {
        Self { entity_type, id }
    }

    #[must_use]
    pub const fn project(id: i64) -> Self {
        Self::new(EntityType::Project, id)
    }

    #[must_use]
    pub const fn dataset(id: i64) -> Self {
        Self::new(EntityType::Dataset, id)
    }

    #[must_use]
    pub const fn screen(id: i64) -> Self {
        Self::new(EntityType::Screen, id)
    }

    #[must_use]
    pub const fn plate(id: i64) -> Self {
        Self::new(EntityType::Plate, id)
    }

    #[must_use]
    pub const fn well(id: i64) -> Self {
        Self::new(EntityType::Well, id)
    }

    #[must_use]
    pub const fn image(id: i64) -> Self {
        Self::new(EntityType::Image, id)
    }

    #[must_use]
    pub const fn fileset(id: i64) -> Self {
        Self::new(EntityType::Fileset, id)
    }

    /// Parses a target from its `Type:id` form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (type_part, id_part) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidTarget(s.to_string()))?;
        let entity_type = type_part.parse()?;
        let id = id_part
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidTarget(s.to_string()))?;
        Ok(Self::new(entity_type, id))
    }
}

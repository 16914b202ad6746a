//! Domain entities: provider records as seen by the hierarchy core

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provider identifier of a pathway class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub i64);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque provider identifier of a pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathwayId(pub i64);

impl fmt::Display for PathwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved organism, used for every pathway lookup of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganismHandle {
    pub name: String,
}

impl fmt::Display for OrganismHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Raw classification category as returned by the provider.
///
/// The name is optional because providers may hand out nameless records;
/// the builder rejects those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierNode {
    pub id: ClassId,
    pub name: Option<String>,
}

/// Reference to a provider-owned pathway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayRef {
    pub id: PathwayId,
    pub name: String,
}

/// Kind of a pathway member entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Gene,
    Rna,
    Protein,
    Compound,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Gene => "gene",
            EntityKind::Rna => "rna",
            EntityKind::Protein => "protein",
            EntityKind::Compound => "compound",
        };
        write!(f, "{s}")
    }
}

/// Gene, RNA or other member of a pathway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub name: String,
    pub kind: EntityKind,
}

/// Directed relation between two entities of a pathway network, by entity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub source: String,
    pub target: String,
    pub kind: Option<String>,
}

/// Network view of a single pathway, as handed to a network exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayNetwork {
    pub name: String,
    pub nodes: Vec<EntityRef>,
    pub edges: Vec<Interaction>,
}

//! TOML-backed pathway provider
//!
//! Catalog layout:
//! ```toml
//! [[organisms]]
//! name = "Vitis"
//!
//! [[classes]]
//! id = 1
//! name = "Metabolism"
//!
//! [[classes]]
//! id = 2
//! name = "Carbohydrate Metabolism"
//! parent = 1
//!
//! [[pathways]]
//! id = 100
//! name = "Glycolysis"
//! organism = "Vitis"
//! classes = [2]
//! entities = [
//!     { name = "HXK1", kind = "gene" },
//!     { name = "miR156", kind = "rna" },
//! ]
//! interactions = [{ source = "miR156", target = "HXK1", kind = "represses" }]
//! ```
//!
//! Classes without `parent` are classification roots. Subclass order,
//! pathway order and entity order follow the file.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    ClassId, ClassifierNode, EntityKind, EntityRef, Interaction, OrganismHandle, PathwayId,
    PathwayNetwork, PathwayRef,
};
use crate::infrastructure::traits::{FileSystem, PathwayProvider, ProviderError, ProviderResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OrganismRecord {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClassRecord {
    pub id: ClassId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent: Option<ClassId>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EntityRecord {
    pub name: String,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InteractionRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PathwayRecord {
    pub id: PathwayId,
    pub name: String,
    pub organism: String,
    #[serde(default)]
    pub classes: Vec<ClassId>,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
    #[serde(default)]
    pub interactions: Vec<InteractionRecord>,
}

/// Parsed catalog file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Catalog {
    pub organisms: Vec<OrganismRecord>,
    pub classes: Vec<ClassRecord>,
    pub pathways: Vec<PathwayRecord>,
}

impl Catalog {
    pub fn from_toml_str(content: &str) -> ProviderResult<Self> {
        toml::from_str(content).map_err(|e| ProviderError::new(format!("parse catalog: {e}")))
    }
}

/// [`PathwayProvider`] answering from an in-memory [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    catalog: Catalog,
}

impl CatalogProvider {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Read and parse a catalog file.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> ProviderResult<Self> {
        debug!("load catalog: {}", path.display());
        let content = fs
            .read_to_string(path)
            .map_err(|e| ProviderError::new(format!("read catalog {}: {e}", path.display())))?;
        let catalog = Catalog::from_toml_str(&content)?;
        debug!(
            "catalog: {} organisms, {} classes, {} pathways",
            catalog.organisms.len(),
            catalog.classes.len(),
            catalog.pathways.len()
        );
        Ok(Self::new(catalog))
    }

    fn pathway_record(&self, id: PathwayId) -> ProviderResult<&PathwayRecord> {
        self.catalog
            .pathways
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ProviderError::new(format!("unknown pathway id: {id}")))
    }

    fn classifier_node(record: &ClassRecord) -> ClassifierNode {
        ClassifierNode {
            id: record.id,
            name: record.name.clone(),
        }
    }

    fn pathway_ref(record: &PathwayRecord) -> PathwayRef {
        PathwayRef {
            id: record.id,
            name: record.name.clone(),
        }
    }
}

impl PathwayProvider for CatalogProvider {
    fn resolve_organism(&self, name: &str) -> ProviderResult<Option<OrganismHandle>> {
        Ok(self
            .catalog
            .organisms
            .iter()
            .find(|o| o.name == name)
            .map(|o| OrganismHandle {
                name: o.name.clone(),
            }))
    }

    fn list_organisms(&self) -> ProviderResult<Vec<OrganismHandle>> {
        Ok(self
            .catalog
            .organisms
            .iter()
            .map(|o| OrganismHandle {
                name: o.name.clone(),
            })
            .collect())
    }

    fn top_level_classes(&self) -> ProviderResult<Vec<ClassifierNode>> {
        Ok(self
            .catalog
            .classes
            .iter()
            .filter(|c| c.parent.is_none())
            .map(Self::classifier_node)
            .collect())
    }

    fn own_pathways(
        &self,
        class: &ClassifierNode,
        organism: &OrganismHandle,
    ) -> ProviderResult<Vec<PathwayRef>> {
        Ok(self
            .catalog
            .pathways
            .iter()
            .filter(|p| p.organism == organism.name && p.classes.contains(&class.id))
            .map(Self::pathway_ref)
            .collect())
    }

    fn child_classes(&self, class: &ClassifierNode) -> ProviderResult<Vec<ClassifierNode>> {
        Ok(self
            .catalog
            .classes
            .iter()
            .filter(|c| c.parent == Some(class.id))
            .map(Self::classifier_node)
            .collect())
    }

    fn pathway(&self, id: PathwayId) -> ProviderResult<PathwayRef> {
        self.pathway_record(id).map(Self::pathway_ref)
    }

    fn pathway_entities(&self, id: PathwayId, kind: EntityKind) -> ProviderResult<Vec<EntityRef>> {
        Ok(self
            .pathway_record(id)?
            .entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| EntityRef {
                name: e.name.clone(),
                kind: e.kind,
            })
            .collect())
    }

    fn organism_pathways(&self, organism: &OrganismHandle) -> ProviderResult<Vec<PathwayRef>> {
        Ok(self
            .catalog
            .pathways
            .iter()
            .filter(|p| p.organism == organism.name)
            .map(Self::pathway_ref)
            .collect())
    }

    fn pathway_network(&self, id: PathwayId) -> ProviderResult<PathwayNetwork> {
        let record = self.pathway_record(id)?;
        Ok(PathwayNetwork {
            name: record.name.clone(),
            nodes: record
                .entities
                .iter()
                .map(|e| EntityRef {
                    name: e.name.clone(),
                    kind: e.kind,
                })
                .collect(),
            edges: record
                .interactions
                .iter()
                .map(|i| Interaction {
                    source: i.source.clone(),
                    target: i.target.clone(),
                    kind: i.kind.clone(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[[organisms]]
name = "Vitis"

[[classes]]
id = 1
name = "Metabolism"

[[classes]]
id = 2
name = "Sugars"
parent = 1

[[pathways]]
id = 100
name = "Glycolysis"
organism = "Vitis"
classes = [2]
entities = [
    { name = "HXK1", kind = "gene" },
    { name = "miR156", kind = "rna" },
]
"#;

    #[test]
    fn given_catalog_text_when_parsing_then_reads_all_sections() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();

        assert_eq!(catalog.organisms.len(), 1);
        assert_eq!(catalog.classes[1].parent, Some(ClassId(1)));
        assert_eq!(catalog.pathways[0].entities[1].kind, EntityKind::Rna);
        assert!(catalog.pathways[0].interactions.is_empty());
    }

    #[test]
    fn given_invalid_toml_when_parsing_then_errors() {
        let result = Catalog::from_toml_str("[[classes]]\nid = \"one\"\n");

        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("parse catalog"));
    }

    #[test]
    fn given_unknown_pathway_when_resolving_then_errors() {
        let provider = CatalogProvider::new(Catalog::from_toml_str(CATALOG).unwrap());

        let err = provider.pathway(PathwayId(7)).unwrap_err();

        assert!(err.message.contains("unknown pathway id: 7"));
    }
}

//! I/O boundary traits for testability
//!
//! These traits abstract the pathway data source, the filesystem and the
//! network writer, allowing services to be tested with mock implementations.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::domain::{
    ClassifierNode, EntityKind, EntityRef, OrganismHandle, PathwayId, PathwayNetwork, PathwayRef,
};

/// Failure reported by a pathway provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for provider lookups.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Pathway knowledge base abstraction.
///
/// All calls are read-only and blocking. Sequences are returned in the
/// provider's own order, which the exporters preserve.
pub trait PathwayProvider: Send + Sync {
    /// Resolve an organism by name. `Ok(None)` if it does not exist.
    fn resolve_organism(&self, name: &str) -> ProviderResult<Option<OrganismHandle>>;

    /// All organisms known to the provider.
    fn list_organisms(&self) -> ProviderResult<Vec<OrganismHandle>>;

    /// Classification roots.
    fn top_level_classes(&self) -> ProviderResult<Vec<ClassifierNode>>;

    /// Pathways owned directly by `class` for `organism`.
    fn own_pathways(
        &self,
        class: &ClassifierNode,
        organism: &OrganismHandle,
    ) -> ProviderResult<Vec<PathwayRef>>;

    /// Direct subclasses of `class`.
    fn child_classes(&self, class: &ClassifierNode) -> ProviderResult<Vec<ClassifierNode>>;

    /// Resolve a pathway id to its reference.
    fn pathway(&self, id: PathwayId) -> ProviderResult<PathwayRef>;

    /// Member entities of one kind.
    fn pathway_entities(&self, id: PathwayId, kind: EntityKind) -> ProviderResult<Vec<EntityRef>>;

    /// All pathways of an organism.
    fn organism_pathways(&self, organism: &OrganismHandle) -> ProviderResult<Vec<PathwayRef>>;

    /// Network view of one pathway.
    fn pathway_network(&self, id: PathwayId) -> ProviderResult<PathwayNetwork>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Writer for pathway networks in a graph-interchange format.
pub trait NetworkExporter: Send + Sync {
    /// File name (no directory) used for the network of `pathway_name`.
    fn file_name(&self, pathway_name: &str) -> String;

    /// Serialize `network` to `path`.
    fn export(&self, network: &PathwayNetwork, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

//! Export service
//!
//! Orchestrates build → render → serialize → write for the XML hierarchy and
//! drives the network exporter for XGMML files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::error_ext::{IoResultExt, ProviderResultExt};
use crate::application::services::hierarchy::{HierarchyBuilder, DEFAULT_MAX_DEPTH};
use crate::application::services::render::{HierarchyRenderer, RenderOptions};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, HierarchyTree, OrganismHandle, PathwayRef, RenderedDocument};
use crate::infrastructure::traits::{FileSystem, NetworkExporter, PathwayProvider};
use crate::infrastructure::xml::write_document;
use crate::util::path::sanitize_file_name;

/// Service exporting pathway hierarchies and networks for an organism.
pub struct ExportService {
    provider: Arc<dyn PathwayProvider>,
    fs: Arc<dyn FileSystem>,
    exporter: Arc<dyn NetworkExporter>,
    max_depth: usize,
}

impl ExportService {
    pub fn new(
        provider: Arc<dyn PathwayProvider>,
        fs: Arc<dyn FileSystem>,
        exporter: Arc<dyn NetworkExporter>,
    ) -> Self {
        Self {
            provider,
            fs,
            exporter,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build a fresh hierarchy tree for `organism`.
    pub fn build_tree(&self, organism: &str) -> ApplicationResult<HierarchyTree> {
        HierarchyBuilder::with_max_depth(self.provider.clone(), self.max_depth).build(organism)
    }

    /// Build and render the hierarchy of `organism`.
    pub fn render(
        &self,
        organism: &str,
        options: &RenderOptions,
    ) -> ApplicationResult<RenderedDocument> {
        let tree = self.build_tree(organism)?;
        HierarchyRenderer::new(self.provider.clone()).render(&tree, options)
    }

    /// Export the hierarchy of `organism` to `<dir>/<organism><unix millis>.xml`,
    /// the organism part sanitized like network file names.
    ///
    /// Nothing is written unless build and render both succeed.
    #[instrument(level = "debug", skip(self))]
    pub fn export_xml(
        &self,
        organism: &str,
        options: &RenderOptions,
        dir: &Path,
    ) -> ApplicationResult<PathBuf> {
        self.ensure_output_dir(dir)?;

        let document = self.render(organism, options)?;
        let xml = write_document(&document);

        let file_name = format!(
            "{}{}.xml",
            sanitize_file_name(organism),
            chrono::Utc::now().timestamp_millis()
        );
        let path = dir.join(file_name);
        self.fs.write(&path, &xml).with_path_context("write xml", &path)?;

        info!("wrote {} ({} bytes)", path.display(), xml.len());
        Ok(path)
    }

    /// Export one network file per pathway of `organism` into `dir`.
    ///
    /// With an empty `pathway_names` every pathway of the organism is exported,
    /// otherwise exactly the named ones, in the given order.
    #[instrument(level = "debug", skip(self))]
    pub fn export_networks(
        &self,
        organism: &str,
        pathway_names: &[String],
        dir: &Path,
    ) -> ApplicationResult<Vec<PathBuf>> {
        self.ensure_output_dir(dir)?;

        let handle = self.resolve_organism(organism)?;
        let available = self
            .provider
            .organism_pathways(&handle)
            .during("list organism pathways")?;
        let selected = select_pathways(&available, pathway_names, &handle)?;
        debug!("export_networks: {} of {} pathways", selected.len(), available.len());

        let mut written = Vec::with_capacity(selected.len());
        for pathway in selected {
            let network = self
                .provider
                .pathway_network(pathway.id)
                .during("load pathway network")?;
            let path = dir.join(self.exporter.file_name(&pathway.name));
            self.exporter
                .export(&network, &path)
                .with_path_context("write network", &path)?;
            written.push(path);
        }

        info!("wrote {} network files to {}", written.len(), dir.display());
        Ok(written)
    }

    /// Pathways of `organism`, in provider order.
    pub fn pathways(&self, organism: &str) -> ApplicationResult<Vec<PathwayRef>> {
        let handle = self.resolve_organism(organism)?;
        self.provider
            .organism_pathways(&handle)
            .during("list organism pathways")
    }

    /// All organisms known to the provider.
    pub fn organisms(&self) -> ApplicationResult<Vec<OrganismHandle>> {
        self.provider.list_organisms().during("list organisms")
    }

    fn resolve_organism(&self, organism: &str) -> ApplicationResult<OrganismHandle> {
        self.provider
            .resolve_organism(organism)
            .during("resolve organism")?
            .ok_or_else(|| DomainError::OrganismNotFound(organism.to_string()).into())
    }

    fn ensure_output_dir(&self, dir: &Path) -> ApplicationResult<()> {
        if self.fs.is_dir(dir) {
            Ok(())
        } else {
            Err(ApplicationError::OutputDirNotFound(dir.to_path_buf()))
        }
    }
}

fn select_pathways<'a>(
    available: &'a [PathwayRef],
    names: &[String],
    organism: &OrganismHandle,
) -> ApplicationResult<Vec<&'a PathwayRef>> {
    if names.is_empty() {
        return Ok(available.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            available
                .iter()
                .find(|p| &p.name == name)
                .ok_or_else(|| ApplicationError::PathwayNotFound {
                    organism: organism.name.clone(),
                    name: name.clone(),
                })
        })
        .collect()
}

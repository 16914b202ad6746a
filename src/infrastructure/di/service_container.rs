//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::ExportService;
use crate::config::Settings;
use crate::infrastructure::catalog::CatalogProvider;
use crate::infrastructure::traits::{FileSystem, NetworkExporter, PathwayProvider, RealFileSystem};
use crate::infrastructure::xgmml::XgmmlExporter;
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding the collaborators shared by all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Pathway data source
    pub provider: Arc<dyn PathwayProvider>,

    /// Network writer
    pub exporter: Arc<dyn NetworkExporter>,
}

impl ServiceContainer {
    /// Create a container with real implementations, loading the configured catalog.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let provider = CatalogProvider::load(fs.as_ref(), &settings.catalog).map_err(|e| {
            InfraError::Catalog {
                path: settings.catalog.display().to_string(),
                message: e.message,
            }
        })?;
        debug!("catalog loaded from {}", settings.catalog.display());
        let exporter = Arc::new(XgmmlExporter::new(fs.clone()));

        Ok(Self::with_deps(settings, fs, Arc::new(provider), exporter))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        provider: Arc<dyn PathwayProvider>,
        exporter: Arc<dyn NetworkExporter>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            provider,
            exporter,
        }
    }

    /// Export service configured with the settings' depth bound.
    pub fn export_service(&self) -> ExportService {
        ExportService::new(
            self.provider.clone(),
            self.fs.clone(),
            self.exporter.clone(),
        )
        .with_max_depth(self.settings.export.max_depth)
    }
}

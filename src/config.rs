//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pathierarchy/pathierarchy.toml`
//! 3. Local config: `<dir>/.pathierarchy.toml`
//! 4. Environment variables: `PATHIERARCHY_*` prefix
//!
//! CLI flags are applied on top by the command layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{RenderOptions, DEFAULT_MAX_DEPTH};
use crate::application::ApplicationError;
use crate::util::path::expand_path;

/// Export options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportSettings {
    /// Emit gene entities under each pathway
    pub include_genes: bool,
    /// Emit RNA entities under each pathway
    pub include_rna: bool,
    /// Emit pathway classes without any pathway in their subtree
    pub include_empty_classes: bool,
    /// Maximum classification nesting before the build is aborted
    pub max_depth: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            include_genes: false,
            include_rna: false,
            include_empty_classes: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Raw export settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawExportSettings {
    pub include_genes: Option<bool>,
    pub include_rna: Option<bool>,
    pub include_empty_classes: Option<bool>,
    pub max_depth: Option<usize>,
}

impl ExportSettings {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawExportSettings) -> Self {
        Self {
            include_genes: overlay.include_genes.unwrap_or(self.include_genes),
            include_rna: overlay.include_rna.unwrap_or(self.include_rna),
            include_empty_classes: overlay
                .include_empty_classes
                .unwrap_or(self.include_empty_classes),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_genes: self.include_genes,
            include_rna: self.include_rna,
            include_empty_classes: self.include_empty_classes,
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub export: RawExportSettings,
}

/// Unified configuration for pathierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Pathway catalog file (default: <data dir>/pathierarchy/catalog.toml)
    pub catalog: PathBuf,
    /// Directory receiving exported files (default: current directory)
    pub output_dir: PathBuf,
    /// Export options
    pub export: ExportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: default_catalog_path(),
            output_dir: PathBuf::from("."),
            export: ExportSettings::default(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    ProjectDirs::from("", "", "pathierarchy")
        .map(|dirs| dirs.data_dir().join("catalog.toml"))
        .unwrap_or_else(|| PathBuf::from("catalog.toml"))
}

/// Get the XDG config directory for pathierarchy.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pathierarchy").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pathierarchy.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".pathierarchy.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path fields.
    fn expand_paths(&mut self) {
        self.catalog = expand_path(&self.catalog);
        self.output_dir = expand_path(&self.output_dir);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay
                .catalog
                .clone()
                .unwrap_or_else(|| self.catalog.clone()),
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            export: self.export.merge(&overlay.export),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.pathierarchy.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/pathierarchy/pathierarchy.toml`
    /// 3. Local config: `<local_dir>/.pathierarchy.toml`
    /// 4. Environment variables: `PATHIERARCHY_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply PATHIERARCHY_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `PATHIERARCHY_EXPORT__INCLUDE_GENES=true`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("PATHIERARCHY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("export.include_genes") {
            settings.export.include_genes = val;
        }
        if let Ok(val) = config.get_bool("export.include_rna") {
            settings.export.include_rna = val;
        }
        if let Ok(val) = config.get_bool("export.include_empty_classes") {
            settings.export.include_empty_classes = val;
        }
        if let Ok(val) = config.get_int("export.max_depth") {
            settings.export.max_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("export.max_depth must not be negative: {val}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# pathierarchy configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/pathierarchy/pathierarchy.toml
#   Local:  <dir>/.pathierarchy.toml
#   Env:    PATHIERARCHY_* environment variables (nested keys use __)

# Pathway catalog (TOML) serving organisms, classes and pathways
# catalog = "~/.local/share/pathierarchy/catalog.toml"

# Directory receiving exported XML and XGMML files
# output_dir = "."

[export]
# Include gene entities under each pathway
# include_genes = false

# Include RNA entities under each pathway
# include_rna = false

# Include pathway classes without any pathway in their subtree
# include_empty_classes = false

# Abort when the classification is nested deeper than this
# max_depth = 64
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

//! Integration tests for Settings layered loading.
//!
//! These tests run without a global config (temp directories only),
//! so they exercise local config merging over compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use pathierarchy::application::services::DEFAULT_MAX_DEPTH;
use pathierarchy::application::ApplicationError;
use pathierarchy::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
catalog = "/srv/pathways/catalog.toml"
output_dir = "/srv/pathways/out"

[export]
include_genes = true
max_depth = 12
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.catalog, PathBuf::from("/srv/pathways/catalog.toml"));
    assert_eq!(settings.output_dir, PathBuf::from("/srv/pathways/out"));
    assert!(settings.export.include_genes);
    assert!(!settings.export.include_rna);
    assert!(!settings.export.include_empty_classes);
    assert_eq!(settings.export.max_depth, 12);
}

#[test]
fn given_dir_without_local_config_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.output_dir, PathBuf::from("."));
    assert_eq!(settings.export.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!settings.export.include_genes);
}

#[test]
fn given_local_config_with_tilde_when_load_then_expands_home() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "catalog = \"~/pathways/catalog.toml\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(
        settings.catalog,
        PathBuf::from(format!("{home}/pathways/catalog.toml"))
    );
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[export\ninclude_genes = ").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_when_written_as_local_config_then_loads_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load template");

    assert_eq!(settings.export.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!settings.export.include_rna);
}

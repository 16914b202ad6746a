//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (PathwayProvider, FileSystem, NetworkExporter)
//! but are themselves concrete structs, not traits.

mod export;
mod hierarchy;
mod render;

pub use export::ExportService;
pub use hierarchy::{HierarchyBuilder, DEFAULT_MAX_DEPTH};
pub use render::{HierarchyRenderer, RenderOptions};

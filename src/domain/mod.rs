//! Domain layer: entities, the class hierarchy and the rendered document
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod document;
pub mod entities;
pub mod error;

pub use arena::{ClassData, ClassNode, HierarchyTree, TreeIterator};
pub use document::{Element, ElementKind, RenderedDocument};
pub use entities::*;
pub use error::DomainError;

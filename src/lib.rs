//! pathierarchy: export pathway class hierarchies as XML and pathway networks as XGMML.
//!
//! Layers, innermost first:
//! - [`domain`]: class hierarchy arena, rendered document, entities and errors
//! - [`application`]: hierarchy builder, renderer and export orchestration
//! - [`infrastructure`]: catalog provider, XML/XGMML writers, filesystem, DI container
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

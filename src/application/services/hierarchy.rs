//! Hierarchy construction service
//!
//! Mirrors the provider's classification graph into a [`HierarchyTree`] for one
//! organism and marks every class whose subtree owns a pathway.

use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::application::error_ext::ProviderResultExt;
use crate::application::ApplicationResult;
use crate::domain::{ClassData, ClassId, ClassifierNode, DomainError, HierarchyTree};
use crate::infrastructure::traits::PathwayProvider;

/// Default bound on classification nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Builds pathway class hierarchies from a [`PathwayProvider`].
pub struct HierarchyBuilder {
    provider: Arc<dyn PathwayProvider>,
    max_depth: usize,
}

impl HierarchyBuilder {
    pub fn new(provider: Arc<dyn PathwayProvider>) -> Self {
        Self::with_max_depth(provider, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(provider: Arc<dyn PathwayProvider>, max_depth: usize) -> Self {
        Self {
            provider,
            max_depth,
        }
    }

    /// Build the complete class hierarchy of `organism`.
    ///
    /// Fails with `OrganismNotFound` before touching the classification if the
    /// organism does not resolve. Any provider failure aborts the build.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, organism: &str) -> ApplicationResult<HierarchyTree> {
        let handle = self
            .provider
            .resolve_organism(organism)
            .during("resolve organism")?
            .ok_or_else(|| DomainError::OrganismNotFound(organism.to_string()))?;

        let mut tree = HierarchyTree::new(handle);
        let top_level = self
            .provider
            .top_level_classes()
            .during("list top-level classes")?;

        let mut ancestors = Vec::new();
        let has_pathways = self.build_subtree(&mut tree, &top_level, None, &mut ancestors)?;

        debug!(
            "build: {} classes, {} pathways, depth {}, has pathways: {}",
            tree.len(),
            tree.pathway_count(),
            tree.depth(),
            has_pathways
        );
        Ok(tree)
    }

    /// Add `siblings` (and their subtrees) under `parent`, `None` meaning top level.
    ///
    /// Returns true iff any of the sibling subtrees owns a pathway.
    fn build_subtree(
        &self,
        tree: &mut HierarchyTree,
        siblings: &[ClassifierNode],
        parent: Option<Index>,
        ancestors: &mut Vec<ClassId>,
    ) -> ApplicationResult<bool> {
        let mut any_pathways = false;
        for class in siblings {
            if self.build_class(tree, class, parent, ancestors)? {
                any_pathways = true;
            }
        }
        Ok(any_pathways)
    }

    /// Pre-order: the node and its own pathways are recorded before its subclasses.
    fn build_class(
        &self,
        tree: &mut HierarchyTree,
        class: &ClassifierNode,
        parent: Option<Index>,
        ancestors: &mut Vec<ClassId>,
    ) -> ApplicationResult<bool> {
        if ancestors.contains(&class.id) {
            return Err(DomainError::CyclicClassification(class.id).into());
        }
        if ancestors.len() >= self.max_depth {
            return Err(DomainError::MaxDepthExceeded {
                max_depth: self.max_depth,
                class_id: class.id,
            }
            .into());
        }

        let name = class
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DomainError::MalformedProviderData {
                context: format!("class {}", class.id),
                message: "missing class name".to_string(),
            })?
            .to_string();

        let idx = tree.insert_class(
            ClassData {
                class_id: class.id,
                name,
            },
            parent,
        );

        let pathways = self
            .provider
            .own_pathways(class, tree.organism())
            .during("list class pathways")?;
        for pathway in &pathways {
            tree.add_pathway(idx, pathway.id);
        }
        let owns_pathways = !pathways.is_empty();

        let children = self
            .provider
            .child_classes(class)
            .during("list subclasses")?;
        let subclasses_have_pathways = if children.is_empty() {
            false
        } else {
            ancestors.push(class.id);
            let result = self.build_subtree(tree, &children, Some(idx), ancestors);
            ancestors.pop();
            result?
        };

        let has_pathways = owns_pathways || subclasses_have_pathways;
        tree.set_has_pathways(idx, has_pathways);

        if let Some(node) = tree.get_node(idx) {
            trace!("built {}", node);
        }
        Ok(has_pathways)
    }
}

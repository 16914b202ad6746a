//! Hierarchy rendering service
//!
//! Walks a built [`HierarchyTree`] and produces the nested `class` / `pathway`
//! / `gene` / `rna` document, resolving pathway ids through the provider.

use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::application::error_ext::ProviderResultExt;
use crate::application::ApplicationResult;
use crate::domain::{
    ClassNode, DomainError, Element, ElementKind, EntityKind, HierarchyTree, PathwayId,
    RenderedDocument,
};
use crate::infrastructure::traits::PathwayProvider;

/// Inclusion settings for one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `gene` children under each pathway
    pub include_genes: bool,
    /// Emit `rna` children under each pathway
    pub include_rna: bool,
    /// Emit classes whose subtree owns no pathway
    pub include_empty_classes: bool,
}

/// Renders hierarchy trees into documents.
pub struct HierarchyRenderer {
    provider: Arc<dyn PathwayProvider>,
}

impl HierarchyRenderer {
    pub fn new(provider: Arc<dyn PathwayProvider>) -> Self {
        Self { provider }
    }

    /// Render `tree` under `options`.
    ///
    /// A class is emitted only if `include_empty_classes` is set or its subtree
    /// owns a pathway; a skipped class hides its entire subtree. Document order
    /// follows tree order. Any provider failure aborts the render.
    #[instrument(level = "debug", skip(self, tree), fields(organism = %tree.organism()))]
    pub fn render(
        &self,
        tree: &HierarchyTree,
        options: &RenderOptions,
    ) -> ApplicationResult<RenderedDocument> {
        let mut document = RenderedDocument::new();
        self.render_classes(tree, tree.top_level(), &mut document.elements, options)?;
        debug!(
            "render: {} classes, {} pathways",
            document.count(ElementKind::Class),
            document.count(ElementKind::Pathway)
        );
        Ok(document)
    }

    fn render_classes(
        &self,
        tree: &HierarchyTree,
        classes: &[Index],
        out: &mut Vec<Element>,
        options: &RenderOptions,
    ) -> ApplicationResult<()> {
        for &idx in classes {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            if !(options.include_empty_classes || node.has_pathways_in_subtree) {
                trace!("skip {}", node);
                continue;
            }

            let mut element = Element::new(ElementKind::Class, node.data.name.clone());
            self.render_class_content(tree, node, &mut element.children, options)?;
            out.push(element);
        }
        Ok(())
    }

    /// Own pathways first, then subclasses, both into `out`.
    fn render_class_content(
        &self,
        tree: &HierarchyTree,
        node: &ClassNode,
        out: &mut Vec<Element>,
        options: &RenderOptions,
    ) -> ApplicationResult<()> {
        if node.has_pathways_in_subtree {
            for &pathway_id in &node.pathway_ids {
                out.push(self.render_pathway(pathway_id, options)?);
            }
        }
        self.render_classes(tree, &node.children, out, options)
    }

    fn render_pathway(
        &self,
        pathway_id: PathwayId,
        options: &RenderOptions,
    ) -> ApplicationResult<Element> {
        let pathway = self
            .provider
            .pathway(pathway_id)
            .during("resolve pathway")?;
        let name = required_name(&pathway.name, || format!("pathway {pathway_id}"))?;
        let mut element = Element::new(ElementKind::Pathway, name);

        if options.include_rna {
            self.push_entities(&mut element, pathway_id, EntityKind::Rna, ElementKind::Rna)?;
        }
        if options.include_genes {
            self.push_entities(&mut element, pathway_id, EntityKind::Gene, ElementKind::Gene)?;
        }
        Ok(element)
    }

    fn push_entities(
        &self,
        pathway: &mut Element,
        pathway_id: PathwayId,
        kind: EntityKind,
        element_kind: ElementKind,
    ) -> ApplicationResult<()> {
        let entities = self
            .provider
            .pathway_entities(pathway_id, kind)
            .during("list pathway entities")?;
        for entity in entities {
            let name = required_name(&entity.name, || format!("{kind} of pathway {pathway_id}"))?;
            pathway.children.push(Element::new(element_kind, name));
        }
        Ok(())
    }
}

fn required_name(name: &str, context: impl FnOnce() -> String) -> ApplicationResult<String> {
    if name.trim().is_empty() {
        return Err(DomainError::MalformedProviderData {
            context: context(),
            message: "empty name".to_string(),
        }
        .into());
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ClassData, ClassId, ClassifierNode, EntityRef, OrganismHandle, PathwayNetwork, PathwayRef,
    };
    use crate::infrastructure::traits::{ProviderError, ProviderResult};

    /// Resolves every pathway id to `P<id>`; has no classification of its own.
    struct NamingProvider;

    impl PathwayProvider for NamingProvider {
        fn resolve_organism(&self, _name: &str) -> ProviderResult<Option<OrganismHandle>> {
            Ok(None)
        }

        fn list_organisms(&self) -> ProviderResult<Vec<OrganismHandle>> {
            Ok(Vec::new())
        }

        fn top_level_classes(&self) -> ProviderResult<Vec<ClassifierNode>> {
            Ok(Vec::new())
        }

        fn own_pathways(
            &self,
            _class: &ClassifierNode,
            _organism: &OrganismHandle,
        ) -> ProviderResult<Vec<PathwayRef>> {
            Ok(Vec::new())
        }

        fn child_classes(&self, _class: &ClassifierNode) -> ProviderResult<Vec<ClassifierNode>> {
            Ok(Vec::new())
        }

        fn pathway(&self, id: PathwayId) -> ProviderResult<PathwayRef> {
            Ok(PathwayRef {
                id,
                name: format!("P{id}"),
            })
        }

        fn pathway_entities(
            &self,
            _id: PathwayId,
            _kind: EntityKind,
        ) -> ProviderResult<Vec<EntityRef>> {
            Ok(Vec::new())
        }

        fn organism_pathways(&self, _organism: &OrganismHandle) -> ProviderResult<Vec<PathwayRef>> {
            Ok(Vec::new())
        }

        fn pathway_network(&self, id: PathwayId) -> ProviderResult<PathwayNetwork> {
            Err(ProviderError::new(format!("no network for {id}")))
        }
    }

    /// A (flag false) > B (flag true, owns pathway 1)
    fn tree_with_unflagged_parent() -> HierarchyTree {
        let mut tree = HierarchyTree::new(OrganismHandle {
            name: "Test".to_string(),
        });
        let a = tree.insert_class(
            ClassData {
                class_id: ClassId(1),
                name: "A".to_string(),
            },
            None,
        );
        let b = tree.insert_class(
            ClassData {
                class_id: ClassId(2),
                name: "B".to_string(),
            },
            Some(a),
        );
        tree.add_pathway(b, PathwayId(1));
        tree.set_has_pathways(b, true);
        tree
    }

    #[test]
    fn given_unflagged_class_above_pathway_owner_when_rendering_then_hides_whole_subtree() {
        let renderer = HierarchyRenderer::new(Arc::new(NamingProvider));

        let document = renderer
            .render(&tree_with_unflagged_parent(), &RenderOptions::default())
            .unwrap();

        assert!(document.is_empty());
        assert_eq!(document.count(ElementKind::Pathway), 0);
    }

    #[test]
    fn given_unflagged_class_with_include_empty_when_rendering_then_descends() {
        let renderer = HierarchyRenderer::new(Arc::new(NamingProvider));
        let options = RenderOptions {
            include_empty_classes: true,
            ..RenderOptions::default()
        };

        let document = renderer
            .render(&tree_with_unflagged_parent(), &options)
            .unwrap();

        assert_eq!(document.outline(), vec!["class A", "  class B", "    pathway P1"]);
    }
}

//! Terminal rendering of a [`HierarchyTree`] via `termtree`.
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{ClassNode, HierarchyTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self, include_empty_classes: bool) -> Tree<String>;
}

impl TreeNodeConvert for HierarchyTree {
    /// Root label is the organism; classes without pathways in their subtree
    /// are pruned unless `include_empty_classes` is set.
    #[instrument(level = "debug", skip(self), fields(organism = %self.organism()))]
    fn to_tree_string(&self, include_empty_classes: bool) -> Tree<String> {
        fn build_tree(
            tree: &HierarchyTree,
            classes: &[Index],
            include_empty_classes: bool,
            parent_tree: &mut Tree<String>,
        ) {
            for &idx in classes {
                if let Some(node) = tree.get_node(idx) {
                    if !(include_empty_classes || node.has_pathways_in_subtree) {
                        continue;
                    }
                    let mut child_tree = Tree::new(label(node));
                    build_tree(tree, &node.children, include_empty_classes, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let mut root = Tree::new(self.organism().name.clone());
        build_tree(self, self.top_level(), include_empty_classes, &mut root);
        root
    }
}

fn label(node: &ClassNode) -> String {
    match (node.pathway_ids.len(), node.has_pathways_in_subtree) {
        (0, true) => format!("{} *", node.data.name),
        (0, false) => node.data.name.clone(),
        (n, _) => format!("{} * ({n} pathways)", node.data.name),
    }
}

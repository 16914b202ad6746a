//! Arena-backed pathway class hierarchy.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{ClassId, OrganismHandle, PathwayId};

/// Data payload for class nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassData {
    /// Provider id of the pathway class
    pub class_id: ClassId,
    /// Display name of the pathway class
    pub name: String,
}

impl fmt::Display for ClassData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One pathway class in the hierarchy.
#[derive(Debug)]
pub struct ClassNode {
    pub data: ClassData,
    /// Index of parent class, None for top-level classes
    pub parent: Option<Index>,
    /// Subclasses in provider order
    pub children: Vec<Index>,
    /// Pathways owned directly by this class (not by subclasses), in provider order
    pub pathway_ids: Vec<PathwayId>,
    /// True iff this class or any subclass owns at least one pathway
    pub has_pathways_in_subtree: bool,
}

impl fmt::Display for ClassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Node: {} (hasPaths: {})}}",
            self.data.name, self.has_pathways_in_subtree
        )
    }
}

/// Pathway class hierarchy of a single organism.
///
/// The tree itself is the root: it holds the organism and the ordered
/// top-level classes, so no sentinel class node exists. Nodes are only
/// mutated by the hierarchy builder; consumers get shared references.
#[derive(Debug)]
pub struct HierarchyTree {
    organism: OrganismHandle,
    arena: Arena<ClassNode>,
    top_level: Vec<Index>,
}

impl HierarchyTree {
    pub fn new(organism: OrganismHandle) -> Self {
        Self {
            organism,
            arena: Arena::new(),
            top_level: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_class(&mut self, data: ClassData, parent: Option<Index>) -> Index {
        let node = ClassNode {
            data,
            parent,
            children: Vec::new(),
            pathway_ids: Vec::new(),
            has_pathways_in_subtree: false,
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.top_level.push(node_idx);
        }

        node_idx
    }

    pub(crate) fn add_pathway(&mut self, idx: Index, pathway_id: PathwayId) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.pathway_ids.push(pathway_id);
        }
    }

    pub(crate) fn set_has_pathways(&mut self, idx: Index, status: bool) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.has_pathways_in_subtree = status;
        }
    }

    pub fn organism(&self) -> &OrganismHandle {
        &self.organism
    }

    pub fn top_level(&self) -> &[Index] {
        &self.top_level
    }

    pub fn get_node(&self, idx: Index) -> Option<&ClassNode> {
        self.arena.get(idx)
    }

    /// Number of class nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// True iff any class of the organism owns a pathway.
    pub fn has_pathways(&self) -> bool {
        self.top_level
            .iter()
            .filter_map(|&idx| self.get_node(idx))
            .any(|node| node.has_pathways_in_subtree)
    }

    /// Pre-order traversal over all classes, top-level classes in order.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// First class with the given name in pre-order.
    pub fn find_by_name(&self, name: &str) -> Option<(Index, &ClassNode)> {
        self.iter().find(|(_, node)| node.data.name == name)
    }

    /// Maximum nesting level; 0 for a tree without classes.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.top_level
            .iter()
            .map(|&idx| self.calculate_depth(idx))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Total number of pathway references held by all classes.
    pub fn pathway_count(&self) -> usize {
        self.iter().map(|(_, node)| node.pathway_ids.len()).sum()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a HierarchyTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a HierarchyTree) -> Self {
        // Reverse so the first top-level class is popped first
        let stack = tree.top_level.iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a ClassNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

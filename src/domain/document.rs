//! Rendered pathway hierarchy document.

use std::fmt;

/// Element kinds of the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Class,
    Pathway,
    Gene,
    Rna,
}

impl ElementKind {
    /// XML tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Class => "class",
            ElementKind::Pathway => "pathway",
            ElementKind::Gene => "gene",
            ElementKind::Rna => "rna",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Typed container carrying a single `name` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Children of the given kind, in document order.
    pub fn children_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(move |c| c.kind == kind)
    }
}

/// Nested document produced by one render call.
///
/// The root is implicit: `elements` are the top-level `class` containers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub elements: Vec<Element>,
}

impl RenderedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Pre-order walk yielding `(depth, element)`, top-level elements at depth 0.
    pub fn walk(&self) -> Vec<(usize, &Element)> {
        fn visit<'a>(elements: &'a [Element], depth: usize, out: &mut Vec<(usize, &'a Element)>) {
            for element in elements {
                out.push((depth, element));
                visit(&element.children, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        visit(&self.elements, 0, &mut out);
        out
    }

    /// One line per element, `kind name`, indented two spaces per level.
    pub fn outline(&self) -> Vec<String> {
        self.walk()
            .into_iter()
            .map(|(depth, e)| format!("{}{} {}", "  ".repeat(depth), e.kind, e.name))
            .collect()
    }

    /// Number of elements of the given kind anywhere in the document.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.walk().iter().filter(|(_, e)| e.kind == kind).count()
    }
}

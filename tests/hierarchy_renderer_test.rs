//! Tests for HierarchyRenderer

use std::sync::Arc;

use rstest::rstest;

use pathierarchy::application::services::{HierarchyBuilder, HierarchyRenderer, RenderOptions};
use pathierarchy::application::ApplicationError;
use pathierarchy::domain::{DomainError, ElementKind, HierarchyTree, RenderedDocument};
use pathierarchy::infrastructure::catalog::{Catalog, CatalogProvider};
use pathierarchy::infrastructure::traits::PathwayProvider;
use pathierarchy::infrastructure::xml::write_document;
use pathierarchy::util::testing;

/// Organism "Test": class A > class B owning P1 (genes G1, G2)
const SCENARIO: &str = r#"
[[organisms]]
name = "Test"

[[classes]]
id = 1
name = "A"

[[classes]]
id = 2
name = "B"
parent = 1

[[pathways]]
id = 10
name = "P1"
organism = "Test"
classes = [2]
entities = [
    { name = "G1", kind = "gene" },
    { name = "R1", kind = "rna" },
    { name = "G2", kind = "gene" },
    { name = "C1", kind = "compound" },
]
"#;

/// A > {B (P1, P2), E > G}, H (empty top-level)
const MIXED: &str = r#"
[[organisms]]
name = "Test"

[[classes]]
id = 1
name = "A"

[[classes]]
id = 2
name = "B"
parent = 1

[[classes]]
id = 5
name = "E"
parent = 1

[[classes]]
id = 7
name = "G"
parent = 5

[[classes]]
id = 8
name = "H"

[[pathways]]
id = 10
name = "P1"
organism = "Test"
classes = [2]

[[pathways]]
id = 11
name = "P2"
organism = "Test"
classes = [2]
"#;

fn setup(toml: &str) -> (Arc<dyn PathwayProvider>, HierarchyTree) {
    testing::init_test_setup();
    let provider: Arc<dyn PathwayProvider> = Arc::new(CatalogProvider::new(
        Catalog::from_toml_str(toml).expect("parse catalog"),
    ));
    let tree = HierarchyBuilder::new(provider.clone())
        .build("Test")
        .expect("build tree");
    (provider, tree)
}

fn render(toml: &str, options: RenderOptions) -> RenderedDocument {
    let (provider, tree) = setup(toml);
    HierarchyRenderer::new(provider)
        .render(&tree, &options)
        .expect("render")
}

fn options(genes: bool, rna: bool, empty: bool) -> RenderOptions {
    RenderOptions {
        include_genes: genes,
        include_rna: rna,
        include_empty_classes: empty,
    }
}

#[test]
fn given_test_organism_when_rendering_genes_then_emits_nested_classes_pathway_and_genes() {
    // Act
    let document = render(SCENARIO, options(true, false, false));

    // Assert
    assert_eq!(
        document.outline(),
        vec![
            "class A",
            "  class B",
            "    pathway P1",
            "      gene G1",
            "      gene G2",
        ]
    );
}

#[test]
fn given_test_organism_when_writing_xml_then_matches_expected_document() {
    let document = render(SCENARIO, options(true, false, false));

    let xml = write_document(&document);

    assert_eq!(
        xml,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<Pathways>
  <class name="A">
    <class name="B">
      <pathway name="P1">
        <gene name="G1"/>
        <gene name="G2"/>
      </pathway>
    </class>
  </class>
</Pathways>
"#
    );
}

#[test]
fn given_class_without_pathways_and_children_when_rendering_then_document_is_empty() {
    let toml = r#"
[[organisms]]
name = "Test"

[[classes]]
id = 1
name = "A"

[[classes]]
id = 2
name = "B"
parent = 1
"#;

    let document = render(toml, options(true, false, false));

    assert!(document.is_empty());
    assert_eq!(
        write_document(&document),
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n<Pathways/>\n"
    );
}

#[test]
fn given_empty_subtree_when_rendering_without_empty_classes_then_cuts_whole_subtree() {
    let document = render(MIXED, options(false, false, false));

    assert_eq!(
        document.outline(),
        vec!["class A", "  class B", "    pathway P1", "    pathway P2"]
    );
}

#[test]
fn given_include_empty_classes_when_rendering_then_emits_every_class() {
    let document = render(MIXED, options(false, false, true));

    assert_eq!(
        document.outline(),
        vec![
            "class A",
            "  class B",
            "    pathway P1",
            "    pathway P2",
            "  class E",
            "    class G",
            "class H",
        ]
    );
}

#[test]
fn given_pathways_and_subclasses_when_rendering_then_own_pathways_precede_subclasses() {
    let toml = r#"
[[organisms]]
name = "Test"

[[classes]]
id = 1
name = "A"

[[classes]]
id = 2
name = "B"
parent = 1

[[pathways]]
id = 10
name = "Own"
organism = "Test"
classes = [1]

[[pathways]]
id = 20
name = "Nested"
organism = "Test"
classes = [2]
"#;

    let document = render(toml, options(false, false, false));

    assert_eq!(
        document.outline(),
        vec!["class A", "  pathway Own", "  class B", "    pathway Nested"]
    );
}

#[rstest]
#[case(options(false, false, false), 0, 0)]
#[case(options(true, false, false), 2, 0)]
#[case(options(false, true, false), 0, 1)]
#[case(options(true, true, false), 2, 1)]
fn given_entity_flags_when_rendering_then_each_kind_is_independent(
    #[case] opts: RenderOptions,
    #[case] genes: usize,
    #[case] rnas: usize,
) {
    let document = render(SCENARIO, opts);

    assert_eq!(document.count(ElementKind::Gene), genes);
    assert_eq!(document.count(ElementKind::Rna), rnas);
    assert_eq!(document.count(ElementKind::Pathway), 1);
}

#[test]
fn given_both_entity_kinds_when_rendering_then_rna_precedes_genes() {
    let document = render(SCENARIO, options(true, true, false));

    assert_eq!(
        document.outline(),
        vec![
            "class A",
            "  class B",
            "    pathway P1",
            "      rna R1",
            "      gene G1",
            "      gene G2",
        ]
    );
}

#[test]
fn given_same_tree_when_rendering_twice_then_documents_are_equal() {
    let (provider, tree) = setup(MIXED);
    let renderer = HierarchyRenderer::new(provider);
    let opts = options(true, true, true);

    let first = renderer.render(&tree, &opts).unwrap();
    let second = renderer.render(&tree, &opts).unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_tree_from_other_catalog_when_rendering_then_unknown_pathway_aborts() {
    let (_, tree) = setup(SCENARIO);
    let empty: Arc<dyn PathwayProvider> = Arc::new(CatalogProvider::new(
        Catalog::from_toml_str("[[organisms]]\nname = \"Test\"\n").unwrap(),
    ));

    let result = HierarchyRenderer::new(empty).render(&tree, &options(false, false, false));

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::ProviderUnavailable { .. }))
    ));
}

#[test]
fn given_entity_with_blank_name_when_rendering_then_malformed_data() {
    let toml = r#"
[[organisms]]
name = "Test"

[[classes]]
id = 1
name = "A"

[[pathways]]
id = 10
name = "P1"
organism = "Test"
classes = [1]
entities = [{ name = "  ", kind = "gene" }]
"#;

    let (provider, tree) = setup(toml);
    let renderer = HierarchyRenderer::new(provider);

    assert!(renderer.render(&tree, &options(false, false, false)).is_ok());
    assert!(matches!(
        renderer.render(&tree, &options(true, false, false)),
        Err(ApplicationError::Domain(DomainError::MalformedProviderData { .. }))
    ));
}

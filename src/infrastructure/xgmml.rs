//! XGMML network writer
//!
//! Writes one pathway network per file, `<pathway name>.xgmml.xml`, readable
//! by Cytoscape.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::PathwayNetwork;
use crate::infrastructure::traits::{FileSystem, NetworkExporter};
use crate::infrastructure::xml::{escape_attribute, XML_DECLARATION};
use crate::util::path::sanitize_file_name;

pub const XGMML_NAMESPACE: &str = "http://www.cs.rpi.edu/XGMML";

/// File suffix of exported networks.
pub const XGMML_SUFFIX: &str = ".xgmml.xml";

/// Render a network as an XGMML `<graph>` document.
///
/// Nodes are numbered in entity order starting at 1. Interactions referring
/// to an entity that is not part of the network are dropped.
pub fn to_xgmml(network: &PathwayNetwork) -> String {
    let label = escape_attribute(&network.name);
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<graph label=\"{label}\" directed=\"1\" xmlns=\"{XGMML_NAMESPACE}\">\n"
    ));

    let mut ids: HashMap<&str, usize> = HashMap::new();
    for (i, node) in network.nodes.iter().enumerate() {
        let id = i + 1;
        ids.entry(node.name.as_str()).or_insert(id);
        out.push_str(&format!(
            "  <node id=\"{id}\" label=\"{}\">\n    <att name=\"type\" type=\"string\" value=\"{}\"/>\n  </node>\n",
            escape_attribute(&node.name),
            node.kind
        ));
    }

    for edge in &network.edges {
        let (Some(source), Some(target)) = (
            ids.get(edge.source.as_str()),
            ids.get(edge.target.as_str()),
        ) else {
            warn!(
                "{}: skipping interaction {} -> {} with unknown entity",
                network.name, edge.source, edge.target
            );
            continue;
        };
        let kind = edge.kind.as_deref().unwrap_or("interacts");
        out.push_str(&format!(
            "  <edge source=\"{source}\" target=\"{target}\" label=\"{} ({}) {}\">\n    <att name=\"interaction\" type=\"string\" value=\"{}\"/>\n  </edge>\n",
            escape_attribute(&edge.source),
            escape_attribute(kind),
            escape_attribute(&edge.target),
            escape_attribute(kind)
        ));
    }

    out.push_str("</graph>\n");
    out
}

/// [`NetworkExporter`] writing XGMML through a [`FileSystem`].
pub struct XgmmlExporter {
    fs: Arc<dyn FileSystem>,
}

impl XgmmlExporter {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl NetworkExporter for XgmmlExporter {
    fn file_name(&self, pathway_name: &str) -> String {
        format!("{}{}", sanitize_file_name(pathway_name), XGMML_SUFFIX)
    }

    fn export(&self, network: &PathwayNetwork, path: &Path) -> io::Result<()> {
        debug!("export network {} -> {}", network.name, path.display());
        self.fs.write(path, &to_xgmml(network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, EntityRef, Interaction};
    use crate::infrastructure::traits::RealFileSystem;

    fn network() -> PathwayNetwork {
        PathwayNetwork {
            name: "Glycolysis".to_string(),
            nodes: vec![
                EntityRef {
                    name: "HXK1".to_string(),
                    kind: EntityKind::Gene,
                },
                EntityRef {
                    name: "glucose".to_string(),
                    kind: EntityKind::Compound,
                },
            ],
            edges: vec![
                Interaction {
                    source: "glucose".to_string(),
                    target: "HXK1".to_string(),
                    kind: Some("substrate".to_string()),
                },
                Interaction {
                    source: "ghost".to_string(),
                    target: "HXK1".to_string(),
                    kind: None,
                },
            ],
        }
    }

    #[test]
    fn given_network_when_rendering_then_numbers_nodes_and_links_edges() {
        let xml = to_xgmml(&network());

        assert!(xml.contains(r#"<graph label="Glycolysis" directed="1""#));
        assert!(xml.contains(r#"<node id="1" label="HXK1">"#));
        assert!(xml.contains(r#"value="compound""#));
        assert!(xml.contains(r#"<edge source="2" target="1" label="glucose (substrate) HXK1">"#));
        assert!(!xml.contains("ghost"));
        assert!(xml.ends_with("</graph>\n"));
    }

    #[test]
    fn given_control_characters_in_names_when_rendering_then_output_stays_well_formed() {
        let mut net = network();
        net.name = "Glyco\nlysis".to_string();
        net.nodes[0].name = "HXK\u{7}1".to_string();

        let xml = to_xgmml(&net);

        assert!(xml.contains(r#"<graph label="Glyco&#10;lysis""#));
        assert!(xml.contains("label=\"HXK\u{fffd}1\""));
        assert!(!xml.contains('\u{7}'));
    }

    #[test]
    fn given_pathway_name_with_separators_when_naming_file_then_sanitizes() {
        let exporter = XgmmlExporter::new(Arc::new(RealFileSystem));

        assert_eq!(
            exporter.file_name("TCA cycle / glyoxylate"),
            "TCA cycle _ glyoxylate.xgmml.xml"
        );
    }
}

//! XML serialization of rendered hierarchy documents

use crate::domain::{Element, RenderedDocument};

/// XML declaration emitted at the top of every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Name of the document root element.
pub const ROOT_ELEMENT: &str = "Pathways";

const INDENT: &str = "  ";

/// Escape a string for use inside a double-quoted attribute value.
///
/// Tab, newline and carriage return become character references so they
/// survive attribute-value normalization. Characters XML 1.0 does not allow
/// at all become U+FFFD.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            c if !is_xml_char(c) => escaped.push(char::REPLACEMENT_CHARACTER),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_xml_char(c: char) -> bool {
    !matches!(c, '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

/// Serialize `document` as indented XML with declaration and `<Pathways>` root.
///
/// Elements without children are self-closing, e.g. `<gene name="HXK1"/>`.
pub fn write_document(document: &RenderedDocument) -> String {
    fn write_element(out: &mut String, element: &Element, depth: usize) {
        let indent = INDENT.repeat(depth);
        let tag = element.kind.tag();
        let name = escape_attribute(&element.name);

        if element.children.is_empty() {
            out.push_str(&format!("{indent}<{tag} name=\"{name}\"/>\n"));
        } else {
            out.push_str(&format!("{indent}<{tag} name=\"{name}\">\n"));
            for child in &element.children {
                write_element(out, child, depth + 1);
            }
            out.push_str(&format!("{indent}</{tag}>\n"));
        }
    }

    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');

    if document.is_empty() {
        out.push_str(&format!("<{ROOT_ELEMENT}/>\n"));
        return out;
    }

    out.push_str(&format!("<{ROOT_ELEMENT}>\n"));
    for element in &document.elements {
        write_element(&mut out, element, 1);
    }
    out.push_str(&format!("</{ROOT_ELEMENT}>\n"));
    out
}

use crate::document::HostDocument;
use crate::types::{NodeKey, NodeKind};
use std::fmt::Write;

const INDENT_STEP: &str = "  ";

/// Renders the subtree at `root` as one line per node.
///
/// Elements outside the HTML namespace are prefixed with their namespace,
/// e.g. `<svg path d="M0">`.
pub fn outline(doc: &HostDocument, root: NodeKey) -> Vec<String> {
    fn walk(doc: &HostDocument, key: NodeKey, indent: &mut String, out: &mut Vec<String>) {
        let mut line = String::with_capacity(indent.len() + 32);
        line.push_str(indent);
        match doc.kind(key) {
            None => {
                let _ = write!(&mut line, "<missing {key}>");
            }
            Some(NodeKind::Document) => line.push_str("#document"),
            Some(NodeKind::Fragment) => line.push_str("#fragment"),
            Some(NodeKind::Element {
                tag,
                namespace,
                attributes,
            }) => {
                line.push('<');
                line.push_str(namespace.prefix());
                line.push_str(tag);
                for (name, value) in attributes {
                    line.push(' ');
                    line.push_str(name);
                    if let Some(value) = value {
                        let _ = write!(&mut line, "=\"{value}\"");
                    }
                }
                line.push('>');
            }
            Some(NodeKind::Text { text }) => {
                let _ = write!(&mut line, "\"{}\"", text.replace('\n', "\\n"));
            }
            Some(NodeKind::Comment { text }) => {
                let _ = write!(&mut line, "<!--{text}-->");
            }
        }
        out.push(line);

        indent.push_str(INDENT_STEP);
        for child in doc.children(key) {
            walk(doc, *child, indent, out);
        }
        indent.truncate(indent.len() - INDENT_STEP.len());
    }

    let mut out = Vec::new();
    walk(doc, root, &mut String::new(), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Namespace;

    #[test]
    fn outline_shows_namespaces_attributes_and_text() {
        let mut doc = HostDocument::new();
        let div = doc.create_element("div", Namespace::Html);
        let svg = doc.create_element("svg", Namespace::Svg);
        let anchor = doc.create_comment("portal");
        let text = doc.create_text("hi");
        doc.set_attribute(div, "class", Some("box".into())).unwrap();
        doc.set_attribute(svg, "hidden", None).unwrap();
        doc.append_child(doc.root(), div).unwrap();
        doc.append_child(div, svg).unwrap();
        doc.append_child(div, anchor).unwrap();
        doc.append_child(div, text).unwrap();

        assert_eq!(
            outline(&doc, doc.root()),
            vec![
                "#document",
                "  <div class=\"box\">",
                "    <svg svg hidden>",
                "    <!--portal-->",
                "    \"hi\"",
            ]
        );
    }
}

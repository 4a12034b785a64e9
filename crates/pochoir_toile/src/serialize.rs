//! Markup serialisation.

use htmlize::{escape_attribute, escape_text};
use pochoir_relief::{NodeId, NodeKind};

use crate::document::NodeData;

/// Elements serialised without a closing tag
pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

pub(crate) fn write_node(nodes: &[NodeData], node: NodeId, out: &mut String) {
    let Some(data) = nodes.get(node.index()) else {
        return;
    };
    match data.kind() {
        NodeKind::Text => out.push_str(&escape_text(data.text.as_str())),
        NodeKind::Comment => {
            out.push_str("<!--");
            out.push_str(&data.text);
            out.push_str("-->");
        }
        NodeKind::Fragment => {
            for child in &data.children {
                write_node(nodes, *child, out);
            }
        }
        NodeKind::Element => {
            out.push('<');
            out.push_str(&data.tag);
            for attr in &data.attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(attr.value.as_str()));
                out.push('"');
            }
            out.push('>');
            if is_void_tag(&data.tag) {
                return;
            }
            for child in &data.children {
                write_node(nodes, *child, out);
            }
            out.push_str("</");
            out.push_str(&data.tag);
            out.push('>');
        }
    }
}

//! Converts `html5ever`'s reference-counted DOM into the flat arena.

use crate::tree::{NodeData, Tree};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcData, RcDom};

/// Parses HTML text into a [`Tree`].
///
/// The parser is lenient the way browsers are: malformed markup is
/// repaired rather than rejected, and parse diagnostics are discarded.
pub fn parse(html: &str) -> Tree {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let mut tree = Tree::new();
    for child in dom.document.children.borrow().iter() {
        build(child, &mut tree, 0);
    }
    log::debug!("parsed HTML document into {} nodes", tree.node_count());
    tree
}

fn build(handle: &Handle, tree: &mut Tree, parent: usize) {
    match &handle.data {
        RcData::Element { name, attrs, .. } => {
            let id = tree.push(NodeData::element(name.local.as_ref(), parent));
            tree.add_child(parent, id);
            // Attributes take ids before the children so that arena order
            // stays document order.
            for attr in attrs.borrow().iter() {
                let attr_id = tree.push(NodeData::attribute(
                    attr.name.local.as_ref(),
                    &attr.value,
                    id,
                ));
                tree.add_attribute(id, attr_id);
            }
            for child in handle.children.borrow().iter() {
                build(child, tree, id);
            }
        }
        RcData::Text { contents } => {
            let id = tree.push(NodeData::text(&contents.borrow(), parent));
            tree.add_child(parent, id);
        }
        RcData::Comment { contents } => {
            let id = tree.push(NodeData::comment(contents, parent));
            tree.add_child(parent, id);
        }
        // Doctype and processing instructions carry no queryable content.
        _ => {}
    }
}

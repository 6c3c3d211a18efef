//! A handle to a single element of a parsed document.

use crate::error::Error;
use crate::group::GroupedNodeList;
use crate::list::NodeList;
use htmlminer_dom::NodeRef;
use std::cell::OnceCell;

/// A single node of a document, wrapping a cheap tree handle.
///
/// Sub-queries run with this node as their root. The node also exposes a
/// map-like [`NodeHandle::get`] accessor mirroring array access on the
/// node's properties and attributes.
pub struct NodeHandle<'a> {
    node: NodeRef<'a>,
    // Lazily built single-node list backing the find_* delegations.
    scope: OnceCell<NodeList<'a>>,
}

impl<'a> NodeHandle<'a> {
    pub(crate) fn new(node: NodeRef<'a>) -> Self {
        Self {
            node,
            scope: OnceCell::new(),
        }
    }

    /// The element's tag name, `None` for the document root.
    pub fn tag_name(&self) -> Option<&'a str> {
        self.node.tag_name()
    }

    /// The concatenated text content of the node and its descendants.
    pub fn text(&self) -> String {
        self.node.text()
    }

    /// The value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Keyed access to the node's properties: `"tagName"` and `"text"`
    /// are virtual keys, any other key reads the attribute of that name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "tagName" => self.tag_name().map(str::to_string),
            "text" => Some(self.text()),
            _ => self.attribute(key).map(str::to_string),
        }
    }

    /// Documents are read-only; every write attempt is rejected.
    pub fn set(&self, key: &str, _value: &str) -> Result<(), Error> {
        log::warn!("attempted to set '{key}' on a read-only node");
        Err(Error::ReadOnly)
    }

    /// Documents are read-only; every removal attempt is rejected.
    pub fn remove(&self, key: &str) -> Result<(), Error> {
        log::warn!("attempted to remove '{key}' from a read-only node");
        Err(Error::ReadOnly)
    }

    /// The node viewed as a single-entry list. Repeated calls return the
    /// same list instance.
    pub fn as_node_list(&self) -> &NodeList<'a> {
        self.scope.get_or_init(|| NodeList::new(vec![self.node]))
    }

    /// Finds the first element matching a CSS selector below this node.
    pub fn find_first(&self, selector: &str) -> Option<NodeHandle<'a>> {
        self.as_node_list().find_first(selector)
    }

    /// Finds all elements matching a CSS selector below this node.
    pub fn find_all(&self, selector: &str) -> NodeList<'a> {
        self.as_node_list().find_all(selector)
    }

    /// Runs a labelled set of selectors with this node as the group root.
    pub fn find_all_by_group(&self, selectors: &[(&str, &str)]) -> GroupedNodeList<'a> {
        self.as_node_list().find_all_by_group(selectors)
    }

    /// The underlying tree handle.
    pub fn dom_node(&self) -> NodeRef<'a> {
        self.node
    }
}

impl Clone for NodeHandle<'_> {
    fn clone(&self) -> Self {
        // The lazy scope list is not shared between clones.
        Self::new(self.node)
    }
}

impl std::fmt::Debug for NodeHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeHandle")
            .field("tag_name", &self.tag_name())
            .finish()
    }
}

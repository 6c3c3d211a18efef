//! The parsed HTML document and its query entry points.

use crate::group::GroupedNodeList;
use crate::list::NodeList;
use crate::node::NodeHandle;
use htmlminer_dom::Tree;

/// An HTML document parsed into an immutable tree.
///
/// All queries borrow from the document; handles and lists stay valid for
/// as long as the document lives.
pub struct Document {
    tree: Tree,
}

impl Document {
    /// Parses HTML text. Malformed markup is repaired the way browsers
    /// repair it; parsing never fails.
    pub fn parse(html: &str) -> Self {
        Self {
            tree: htmlminer_dom::parse(html),
        }
    }

    /// A handle to the document root.
    pub fn root(&self) -> NodeHandle<'_> {
        NodeHandle::new(self.tree.root())
    }

    /// Finds the first element matching a CSS selector.
    pub fn find_first(&self, selector: &str) -> Option<NodeHandle<'_>> {
        self.root_list().find_first(selector)
    }

    /// Finds all elements matching a CSS selector, in document order.
    pub fn find_all(&self, selector: &str) -> NodeList<'_> {
        self.root_list().find_all(selector)
    }

    /// Runs a labelled set of selectors against the document root.
    /// See [`NodeList::find_all_by_group`].
    pub fn find_all_by_group(&self, selectors: &[(&str, &str)]) -> GroupedNodeList<'_> {
        self.root_list().find_all_by_group(selectors)
    }

    fn root_list(&self) -> NodeList<'_> {
        NodeList::new(vec![self.tree.root()])
    }
}

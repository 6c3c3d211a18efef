//! Defines the core abstraction for a navigable, read-only HTML node tree.
use std::hash::Hash;

/// The type of a node in the tree, aligned with the XPath 1.0 data model.
/// HTML carries no namespaces or processing instructions, so those are
/// absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Root,
    Element,
    Attribute,
    Text,
    Comment,
}

/// The contract for a node in a read-only HTML tree.
///
/// The evaluation engine is written exclusively against this trait. Node
/// handles must be cheap to copy, and `Ord` must order them by document
/// position so that step results can be restored to document order after
/// deduplication.
///
/// `'a` is the lifetime of the underlying tree.
pub trait DomNode<'a>:
    std::fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + PartialOrd + Ord
{
    /// The type of the node (Element, Text, Attribute, etc.).
    fn node_type(&self) -> NodeType;

    /// The name of the node: the tag name for an element, the attribute
    /// name for an attribute. Returns `None` for node types without names.
    fn name(&self) -> Option<&'a str>;

    /// The string value of the node, as defined by the XPath 1.0 `string()`
    /// function.
    /// - For a text node, this is its content.
    /// - For an element or the root, this is the concatenation of the
    ///   string values of all its descendant text nodes.
    /// - For an attribute, this is its value.
    /// - For a comment, this is its content.
    fn string_value(&self) -> String;

    /// An iterator over the attribute nodes of this node.
    /// The iterator will be empty for non-element nodes.
    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// An iterator over the child nodes of this node, in document order.
    /// The iterator will be empty for leaf nodes.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// A reference to the parent node. Returns `None` for the root.
    fn parent(&self) -> Option<Self>;
}

// Test utilities - publicly available for integration testing in downstream crates.
pub mod tests {
    use super::*;
    use std::cmp::Ordering;
    use std::hash::Hasher;

    #[derive(Debug, Clone)]
    struct MockNodeData {
        node_type: NodeType,
        name: Option<&'static str>,
        value: &'static str,
        parent: Option<usize>,
        children: Vec<usize>,
        attributes: Vec<usize>,
    }

    /// An in-memory tree whose node ids are assigned in document pre-order,
    /// so comparing ids compares document positions.
    #[derive(Debug)]
    pub struct MockTree {
        nodes: Vec<MockNodeData>,
    }

    /// A node handle holding a reference to its tree so it can navigate
    /// itself.
    #[derive(Debug, Clone, Copy)]
    pub struct MockNode<'a> {
        pub id: usize,
        pub tree: &'a MockTree,
    }

    impl PartialEq for MockNode<'_> {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }
    impl Eq for MockNode<'_> {}

    impl PartialOrd for MockNode<'_> {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for MockNode<'_> {
        fn cmp(&self, other: &Self) -> Ordering {
            self.id.cmp(&other.id)
        }
    }

    impl Hash for MockNode<'_> {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    impl<'a> DomNode<'a> for MockNode<'a> {
        fn node_type(&self) -> NodeType {
            self.tree.nodes[self.id].node_type
        }

        fn name(&self) -> Option<&'a str> {
            self.tree.nodes[self.id].name
        }

        fn string_value(&self) -> String {
            self.tree.nodes[self.id].value.to_string()
        }

        fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
            let tree = self.tree;
            let ids = tree.nodes[self.id].attributes.clone();
            Box::new(ids.into_iter().map(move |id| MockNode { id, tree }))
        }

        fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
            let tree = self.tree;
            let ids = tree.nodes[self.id].children.clone();
            Box::new(ids.into_iter().map(move |id| MockNode { id, tree }))
        }

        fn parent(&self) -> Option<Self> {
            self.tree.nodes[self.id].parent.map(|id| MockNode {
                id,
                tree: self.tree,
            })
        }
    }

    /// Creates a small HTML-shaped tree for testing:
    /// ```text
    /// (root)                          id 0
    ///   html                          id 1
    ///     body                        id 2
    ///       ul id="menu"              id 3 (attr 4)
    ///         li class="item" Alpha   id 5 (attr 6, text 7)
    ///         li class="item" Beta    id 8 (attr 9, text 10)
    ///         li Gamma                id 11 (text 12)
    ///       p Tail text               id 13 (text 14)
    ///       div                       id 15
    /// ```
    pub fn create_test_tree() -> MockTree {
        fn element(
            name: &'static str,
            value: &'static str,
            parent: usize,
            children: Vec<usize>,
            attributes: Vec<usize>,
        ) -> MockNodeData {
            MockNodeData {
                node_type: NodeType::Element,
                name: Some(name),
                value,
                parent: Some(parent),
                children,
                attributes,
            }
        }

        fn attribute(name: &'static str, value: &'static str, parent: usize) -> MockNodeData {
            MockNodeData {
                node_type: NodeType::Attribute,
                name: Some(name),
                value,
                parent: Some(parent),
                children: vec![],
                attributes: vec![],
            }
        }

        fn text(value: &'static str, parent: usize) -> MockNodeData {
            MockNodeData {
                node_type: NodeType::Text,
                name: None,
                value,
                parent: Some(parent),
                children: vec![],
                attributes: vec![],
            }
        }

        MockTree {
            nodes: vec![
                MockNodeData {
                    node_type: NodeType::Root,
                    name: None,
                    value: "AlphaBetaGammaTail text",
                    parent: None,
                    children: vec![1],
                    attributes: vec![],
                },
                element("html", "AlphaBetaGammaTail text", 0, vec![2], vec![]),
                element("body", "AlphaBetaGammaTail text", 1, vec![3, 13, 15], vec![]),
                element("ul", "AlphaBetaGamma", 2, vec![5, 8, 11], vec![4]),
                attribute("id", "menu", 3),
                element("li", "Alpha", 3, vec![7], vec![6]),
                attribute("class", "item", 5),
                text("Alpha", 5),
                element("li", "Beta", 3, vec![10], vec![9]),
                attribute("class", "item", 8),
                text("Beta", 8),
                element("li", "Gamma", 3, vec![12], vec![]),
                text("Gamma", 11),
                element("p", "Tail text", 2, vec![14], vec![]),
                text("Tail text", 13),
                element("div", "", 2, vec![], vec![]),
            ],
        }
    }
}

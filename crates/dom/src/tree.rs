//! The arena tree and its `Copy` node handle.

use htmlminer_xpath::{DomNode, NodeType};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) node_type: NodeType,
    pub(crate) name: Option<String>,
    pub(crate) value: String,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) attributes: Vec<usize>,
}

impl NodeData {
    pub(crate) fn element(name: &str, parent: usize) -> Self {
        Self {
            node_type: NodeType::Element,
            name: Some(name.to_string()),
            value: String::new(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn attribute(name: &str, value: &str, parent: usize) -> Self {
        Self {
            node_type: NodeType::Attribute,
            name: Some(name.to_string()),
            value: value.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn text(value: &str, parent: usize) -> Self {
        Self {
            node_type: NodeType::Text,
            name: None,
            value: value.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn comment(value: &str, parent: usize) -> Self {
        Self {
            node_type: NodeType::Comment,
            name: None,
            value: value.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

/// An immutable arena of nodes. Ids are assigned in document pre-order
/// (attributes directly after their element, before its children), so
/// comparing ids compares document positions.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                node_type: NodeType::Root,
                name: None,
                value: String::new(),
                parent: None,
                children: Vec::new(),
                attributes: Vec::new(),
            }],
        }
    }

    pub(crate) fn push(&mut self, data: NodeData) -> usize {
        let id = self.nodes.len();
        self.nodes.push(data);
        id
    }

    pub(crate) fn add_child(&mut self, parent: usize, child: usize) {
        self.nodes[parent].children.push(child);
    }

    pub(crate) fn add_attribute(&mut self, element: usize, attribute: usize) {
        self.nodes[element].attributes.push(attribute);
    }

    fn data(&self, id: usize) -> &NodeData {
        &self.nodes[id]
    }

    /// The document root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { id: 0, tree: self }
    }

    /// Total number of nodes in the arena, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A cheap handle to one node of a [`Tree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) id: usize,
    pub(crate) tree: &'a Tree,
}

impl<'a> NodeRef<'a> {
    /// The element's tag name, `None` for non-element nodes.
    pub fn tag_name(&self) -> Option<&'a str> {
        match self.node_type() {
            NodeType::Element => self.tree.data(self.id).name.as_deref(),
            _ => None,
        }
    }

    /// The value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.tree
            .data(self.id)
            .attributes
            .iter()
            .map(|&id| self.tree.data(id))
            .find(|data| data.name.as_deref() == Some(name))
            .map(|data| data.value.as_str())
    }

    /// The concatenated text content of the node and its descendants.
    pub fn text(&self) -> String {
        self.string_value()
    }

    fn collect_text(&self, out: &mut String) {
        let data = self.tree.data(self.id);
        match data.node_type {
            NodeType::Text => out.push_str(&data.value),
            NodeType::Root | NodeType::Element => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
            NodeType::Attribute | NodeType::Comment => {}
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for NodeRef<'_> {}

impl PartialOrd for NodeRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for NodeRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<'a> DomNode<'a> for NodeRef<'a> {
    fn node_type(&self) -> NodeType {
        self.tree.data(self.id).node_type
    }

    fn name(&self) -> Option<&'a str> {
        self.tree.data(self.id).name.as_deref()
    }

    fn string_value(&self) -> String {
        let data = self.tree.data(self.id);
        match data.node_type {
            NodeType::Text | NodeType::Comment | NodeType::Attribute => data.value.clone(),
            NodeType::Root | NodeType::Element => {
                let mut out = String::new();
                self.collect_text(&mut out);
                out
            }
        }
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let tree = self.tree;
        let ids = tree.data(self.id).attributes.clone();
        Box::new(ids.into_iter().map(move |id| NodeRef { id, tree }))
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let tree = self.tree;
        let ids = tree.data(self.id).children.clone();
        Box::new(ids.into_iter().map(move |id| NodeRef { id, tree }))
    }

    fn parent(&self) -> Option<Self> {
        self.tree.data(self.id).parent.map(|id| NodeRef {
            id,
            tree: self.tree,
        })
    }
}

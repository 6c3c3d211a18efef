//! Ordered collections of matched nodes and their cursor.

use crate::error::Error;
use crate::group::{Group, GroupedNodeList};
use crate::node::NodeHandle;
use htmlminer_dom::NodeRef;
use htmlminer_xpath::{DomNode, EvaluationContext, Expression, NodeType, Value, evaluate};

/// Compiles a selector and parses the resulting XPath text. `None` means
/// the expression is unusable and the query matches nothing.
pub(crate) fn compiled(selector: &str) -> Option<Expression> {
    let xpath = htmlminer_selector::compile(selector);
    match htmlminer_xpath::parse_expression(&xpath) {
        Ok(expr) => Some(expr),
        Err(e) => {
            log::debug!("selector '{selector}' produced an unusable expression: {e}");
            None
        }
    }
}

/// Evaluates a compiled expression with `root` as the context node and
/// keeps the element matches, in document order.
pub(crate) fn elements<'a>(expr: &Expression, root: NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let ctx = EvaluationContext::new(root, 1, 1);
    match evaluate(expr, &ctx) {
        Ok(Value::NodeSet(nodes)) => nodes
            .into_iter()
            .filter(|n| n.node_type() == NodeType::Element)
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            log::debug!("evaluation failed: {e}");
            Vec::new()
        }
    }
}

/// An ordered list of matched nodes.
///
/// Queries on a list run against each of its nodes in turn, and the
/// per-node results are concatenated. Nodes matched under more than one
/// list entry appear once per entry.
#[derive(Clone)]
pub struct NodeList<'a> {
    nodes: Vec<NodeRef<'a>>,
}

impl<'a> NodeList<'a> {
    pub(crate) fn new(nodes: Vec<NodeRef<'a>>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `index`.
    pub fn get(&self, index: usize) -> Result<NodeHandle<'a>, Error> {
        self.nodes
            .get(index)
            .map(|&node| NodeHandle::new(node))
            .ok_or(Error::OutOfBounds {
                index,
                len: self.nodes.len(),
            })
    }

    /// All entries as node handles.
    pub fn nodes(&self) -> Vec<NodeHandle<'a>> {
        self.nodes.iter().map(|&n| NodeHandle::new(n)).collect()
    }

    /// All entries as raw tree handles.
    pub fn dom_nodes(&self) -> Vec<NodeRef<'a>> {
        self.nodes.clone()
    }

    /// A restartable cursor over the list.
    pub fn iter(&self) -> Cursor<'_, 'a> {
        Cursor {
            list: self,
            position: 0,
        }
    }

    /// Finds the first element matching a CSS selector, searching the
    /// list entries in order.
    pub fn find_first(&self, selector: &str) -> Option<NodeHandle<'a>> {
        let expr = compiled(selector)?;
        for &root in &self.nodes {
            if let Some(node) = elements(&expr, root).into_iter().next() {
                return Some(NodeHandle::new(node));
            }
        }
        None
    }

    /// Finds all elements matching a CSS selector under each list entry.
    pub fn find_all(&self, selector: &str) -> NodeList<'a> {
        let Some(expr) = compiled(selector) else {
            return NodeList::new(Vec::new());
        };
        let mut matches = Vec::new();
        for &root in &self.nodes {
            matches.extend(elements(&expr, root));
        }
        NodeList::new(matches)
    }

    /// Runs a labelled set of selectors against each list entry.
    ///
    /// For every entry, each selector contributes its first element match
    /// under that entry. An entry joins the result only when every
    /// selector matched, so each returned group is complete. Labels act
    /// as map keys: a repeated label collapses into one entry and the
    /// group can no longer complete.
    pub fn find_all_by_group(&self, selectors: &[(&str, &str)]) -> GroupedNodeList<'a> {
        let compiled_selectors: Vec<(&str, Option<Expression>)> = selectors
            .iter()
            .map(|&(label, selector)| (label, compiled(selector)))
            .collect();

        let mut groups = Vec::new();
        for &root in &self.nodes {
            let mut entries: Vec<(String, NodeRef<'a>)> = Vec::new();
            for (label, expr) in &compiled_selectors {
                let Some(expr) = expr else { continue };
                if let Some(node) = elements(expr, root).into_iter().next() {
                    match entries.iter_mut().find(|(key, _)| key.as_str() == *label) {
                        Some(entry) => entry.1 = node,
                        None => entries.push((label.to_string(), node)),
                    }
                }
            }
            if entries.len() == selectors.len() {
                groups.push(Group::new(entries));
            }
        }
        GroupedNodeList::new(groups)
    }
}

impl<'l, 'a> IntoIterator for &'l NodeList<'a> {
    type Item = NodeHandle<'a>;
    type IntoIter = Cursor<'l, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A seekable cursor over a [`NodeList`].
pub struct Cursor<'l, 'a> {
    list: &'l NodeList<'a>,
    position: usize,
}

impl<'l, 'a> Cursor<'l, 'a> {
    /// The entry under the cursor, `None` once the cursor is exhausted.
    pub fn current(&self) -> Option<NodeHandle<'a>> {
        self.list.get(self.position).ok()
    }

    /// The cursor's current position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to an absolute position. An out-of-bounds
    /// position is an error and leaves the cursor unchanged.
    pub fn seek(&mut self, position: usize) -> Result<(), Error> {
        if position >= self.list.len() {
            return Err(Error::OutOfBounds {
                index: position,
                len: self.list.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Restarts the cursor at the first entry.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl<'a> Iterator for Cursor<'_, 'a> {
    type Item = NodeHandle<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current()?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

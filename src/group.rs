//! Grouped query results: one labelled set of nodes per matched root.

use crate::error::Error;
use crate::list::NodeList;
use crate::node::NodeHandle;
use htmlminer_dom::NodeRef;

/// One complete group: a node per selector label, in selector order.
#[derive(Clone)]
pub struct Group<'a> {
    entries: Vec<(String, NodeRef<'a>)>,
}

impl<'a> Group<'a> {
    pub(crate) fn new(entries: Vec<(String, NodeRef<'a>)>) -> Self {
        Self { entries }
    }

    /// The node captured under `label`.
    pub fn node(&self, label: &str) -> Option<NodeHandle<'a>> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|&(_, node)| NodeHandle::new(node))
    }

    /// The labels of this group, in selector order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub(crate) fn nodes(&self) -> Vec<NodeRef<'a>> {
        self.entries.iter().map(|&(_, node)| node).collect()
    }
}

/// The result of a grouped query: one [`Group`] per root whose selectors
/// all matched.
pub struct GroupedNodeList<'a> {
    groups: Vec<Group<'a>>,
}

impl<'a> GroupedNodeList<'a> {
    pub(crate) fn new(groups: Vec<Group<'a>>) -> Self {
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group at `index`, viewed as a plain node list in label order.
    pub fn get(&self, index: usize) -> Result<NodeList<'a>, Error> {
        self.group(index).map(|g| NodeList::new(g.nodes()))
    }

    /// The group at `index`.
    pub fn group(&self, index: usize) -> Result<&Group<'a>, Error> {
        self.groups.get(index).ok_or(Error::OutOfBounds {
            index,
            len: self.groups.len(),
        })
    }

    /// A restartable cursor over the groups.
    pub fn iter(&self) -> GroupCursor<'_, 'a> {
        GroupCursor {
            list: self,
            position: 0,
        }
    }
}

impl<'l, 'a> IntoIterator for &'l GroupedNodeList<'a> {
    type Item = &'l Group<'a>;
    type IntoIter = GroupCursor<'l, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A seekable cursor over a [`GroupedNodeList`].
pub struct GroupCursor<'l, 'a> {
    list: &'l GroupedNodeList<'a>,
    position: usize,
}

impl<'l, 'a> GroupCursor<'l, 'a> {
    /// The group under the cursor, `None` once the cursor is exhausted.
    pub fn current(&self) -> Option<&'l Group<'a>> {
        self.list.groups.get(self.position)
    }

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

    /// Restarts the cursor at the first group.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl<'l, 'a> Iterator for GroupCursor<'l, 'a> {
    type Item = &'l Group<'a>;

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

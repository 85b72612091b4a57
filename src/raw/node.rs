use core::mem;

use super::handle::Handle;

/// Which child link of a parent points at a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A binary tree node. Children are owned through the arena; a node never
/// links back to its parent.
#[derive(Clone)]
pub(crate) struct Node<K, I> {
    key: K,
    item: I,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K, I> Node<K, I> {
    /// Creates a leaf.
    pub(crate) const fn new(key: K, item: I) -> Self {
        Self {
            key,
            item,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn item(&self) -> &I {
        &self.item
    }

    #[inline]
    pub(crate) fn item_mut(&mut self) -> &mut I {
        &mut self.item
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Swaps in a new key/item pair, keeping the child links, and returns the old pair.
    pub(crate) fn replace_entry(&mut self, key: K, item: I) -> (K, I) {
        (mem::replace(&mut self.key, key), mem::replace(&mut self.item, item))
    }

    pub(crate) fn into_entry(self) -> (K, I) {
        (self.key, self.item)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_leaf() {
        let node = Node::new(1, "a");
        assert!(node.is_leaf());
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
    }

    #[test]
    fn child_links_by_side() {
        let mut node = Node::new(1, "a");
        node.set_child(Side::Left, Some(Handle::from_index(3)));
        assert_eq!(node.left(), Some(Handle::from_index(3)));
        assert_eq!(node.child(Side::Left), node.left());
        assert!(!node.is_leaf());

        node.set_child(Side::Right, Some(Handle::from_index(4)));
        node.set_child(Side::Left, None);
        assert_eq!(node.left(), None);
        assert_eq!(node.child(Side::Right), Some(Handle::from_index(4)));
    }

    #[test]
    fn replace_entry_keeps_links() {
        let mut node = Node::new(1, "a");
        node.set_child(Side::Right, Some(Handle::from_index(0)));
        assert_eq!(node.replace_entry(2, "b"), (1, "a"));
        assert_eq!((*node.key(), *node.item()), (2, "b"));
        assert_eq!(node.right(), Some(Handle::from_index(0)));
        assert_eq!(node.into_entry(), (2, "b"));
    }
}

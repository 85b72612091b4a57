use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::{BinarySearchTree, NodeRef};
use crate::raw::Handle;

// Inline depth before the spine spills to the heap. Trees built by
// `BalancedBst` stay well under this for any size the arena can address.
#[cfg(test)]
const SPINE_INLINE: usize = 16;
#[cfg(not(test))]
const SPINE_INLINE: usize = 32;

/// Nodes whose subtree on the not-yet-visited side is still pending,
/// root-side at the bottom.
type Spine = SmallVec<[Handle; SPINE_INLINE]>;

/// An iterator over the entries of a [`BinarySearchTree`] in ascending key order.
///
/// This `struct` is created by [`BinarySearchTree::iter`].
///
/// # Examples
///
/// ```
/// use balanced_bst::BinarySearchTree;
///
/// let mut tree = BinarySearchTree::new();
/// tree.insert(2, "b").unwrap();
/// tree.insert(1, "a").unwrap();
///
/// let mut iter = tree.iter();
/// assert_eq!(iter.len(), 2);
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, I> {
    tree: &'a BinarySearchTree<K, I>,
    current: Option<Handle>,
    stack: Spine,
    remaining: usize,
}

impl<'a, K, I> Iter<'a, K, I> {
    pub(super) fn new(tree: &'a BinarySearchTree<K, I>) -> Self {
        Self {
            tree,
            current: tree.root_handle(),
            stack: SmallVec::new(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, I> Iterator for Iter<'a, K, I> {
    type Item = (&'a K, &'a I);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.node(handle).left();
        }

        let node = self.tree.node(self.stack.pop()?);
        self.current = node.right();
        self.remaining -= 1;

        Some((node.key(), node.item()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, I> ExactSizeIterator for Iter<'_, K, I> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, I> FusedIterator for Iter<'_, K, I> {}

impl<K, I> Clone for Iter<'_, K, I> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            current: self.current,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, I> fmt::Debug for Iter<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

/// A stack-driven iterator over the nodes of a [`BinarySearchTree`] in
/// descending key order.
///
/// Each call to [`next`](Iterator::next) first descends the right spine from the
/// pending cursor, pushing every node it passes, then pops the deepest one.
/// The popped node's left child becomes the new cursor. Every node is yielded
/// exactly once: a right subtree entirely before its root, the root before its
/// left subtree. Extra memory is bounded by the tree height and nothing recurses.
///
/// Once `next` returns `None` it keeps returning `None`. The iterator cannot be
/// rewound; ask the tree for a new one to traverse again.
///
/// This `struct` is created by [`BinarySearchTree::rev_iter`] and by iterating
/// a [`BalancedBst`](crate::BalancedBst).
///
/// # Examples
///
/// ```
/// use balanced_bst::BalancedBst;
///
/// let tree = BalancedBst::build([(1, 'a'), (3, 'c'), (2, 'b')])?;
/// let mut nodes = tree.iter();
/// assert_eq!(nodes.next().map(|node| *node.key()), Some(3));
/// assert_eq!(nodes.len(), 2);
///
/// // Resumes where it paused.
/// let rest: Vec<_> = nodes.map(|node| *node.item()).collect();
/// assert_eq!(rest, ['b', 'a']);
/// # Ok::<(), balanced_bst::Error>(())
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ReverseInOrder<'a, K, I> {
    tree: &'a BinarySearchTree<K, I>,
    current: Option<Handle>,
    stack: Spine,
    remaining: usize,
}

impl<'a, K, I> ReverseInOrder<'a, K, I> {
    pub(super) fn new(tree: &'a BinarySearchTree<K, I>) -> Self {
        Self {
            tree,
            current: tree.root_handle(),
            stack: SmallVec::new(),
            remaining: tree.len(),
        }
    }

    /// Returns `true` once every node has been yielded.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none() && self.stack.is_empty()
    }
}

impl<'a, K, I> Iterator for ReverseInOrder<'a, K, I> {
    type Item = NodeRef<'a, K, I>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.node(handle).right();
        }

        // An empty spine with no cursor is the terminal state.
        let handle = self.stack.pop()?;
        self.current = self.tree.node(handle).left();
        self.remaining -= 1;

        Some(NodeRef::new(self.tree, handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, I> ExactSizeIterator for ReverseInOrder<'_, K, I> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, I> FusedIterator for ReverseInOrder<'_, K, I> {}

impl<K, I> Clone for ReverseInOrder<'_, K, I> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            current: self.current,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, I> fmt::Debug for ReverseInOrder<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverseInOrder")
            .field("remaining", &self.remaining)
            .field("depth", &self.stack.len())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use proptest::prelude::*;

    fn tree_of(keys: &[u16]) -> BinarySearchTree<u16, u32> {
        let mut tree = BinarySearchTree::new();
        for &key in keys {
            let _ = tree.insert(key, u32::from(key) * 2);
        }
        tree
    }

    #[test]
    fn empty_tree_is_exhausted_immediately() {
        let tree = tree_of(&[]);
        let mut nodes = tree.rev_iter();
        assert!(nodes.is_exhausted());
        assert!(nodes.next().is_none());
        assert!(tree.iter().next().is_none());
    }

    #[test]
    fn stack_holds_right_spine_between_steps() {
        //       4
        //     2   6
        //    1 3 5 7
        let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let mut nodes = tree.rev_iter();

        assert_eq!(*nodes.next().unwrap().key(), 7);
        // 4 and 6 are waiting for their left subtrees.
        assert_eq!(nodes.stack.len(), 2);
        assert_eq!(*nodes.next().unwrap().key(), 6);
        assert_eq!(nodes.stack.len(), 1);
        assert_eq!(nodes.current.map(|handle| *tree.node(handle).key()), Some(5));
        assert_eq!(*nodes.next().unwrap().key(), 5);
        assert_eq!(*nodes.next().unwrap().key(), 4);
        assert!(nodes.stack.is_empty());

        let rest: Vec<u16> = nodes.by_ref().map(|node| *node.key()).collect();
        assert_eq!(rest, [3, 2, 1]);
        assert!(nodes.is_exhausted());
    }

    #[test]
    fn exhaustion_is_sticky() {
        let tree = tree_of(&[1]);
        let mut nodes = tree.rev_iter();
        assert_eq!(nodes.next().map(|node| node.entry()), Some((&1, &2)));
        for _ in 0..4 {
            assert!(nodes.next().is_none());
            assert_eq!(nodes.len(), 0);
        }
    }

    #[test]
    fn clone_resumes_independently() {
        let tree = tree_of(&[2, 1, 3]);
        let mut nodes = tree.rev_iter();
        nodes.next();
        let copy = nodes.clone();
        let a: Vec<u16> = nodes.map(|node| *node.key()).collect();
        let b: Vec<u16> = copy.map(|node| *node.key()).collect();
        assert_eq!(a, [2, 1]);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_chains() {
        let ascending: Vec<u16> = (0..200).collect();
        let descending: Vec<u16> = (0..200).rev().collect();

        let right_chain = tree_of(&ascending);
        let keys: Vec<u16> = right_chain.rev_iter().map(|node| *node.key()).collect();
        assert_eq!(keys, descending);

        let left_chain = tree_of(&descending);
        let keys: Vec<u16> = left_chain.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ascending);
    }

    proptest! {
        #[test]
        fn reverse_is_ascending_reversed(keys in prop::collection::vec(any::<u16>(), 0..512)) {
            let tree = tree_of(&keys);

            let ascending: Vec<(u16, u32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
            let mut descending: Vec<(u16, u32)> =
                tree.rev_iter().map(|node| (*node.key(), *node.item())).collect();
            descending.reverse();

            prop_assert_eq!(&ascending, &descending);
            prop_assert!(ascending.windows(2).all(|pair| pair[0].0 < pair[1].0));
            prop_assert_eq!(ascending.len(), tree.len());
        }

        #[test]
        fn len_counts_down(keys in prop::collection::vec(any::<u16>(), 0..128)) {
            let tree = tree_of(&keys);
            let mut nodes = tree.rev_iter();
            let mut expected = tree.len();
            prop_assert_eq!(nodes.len(), expected);
            while nodes.next().is_some() {
                expected -= 1;
                prop_assert_eq!(nodes.len(), expected);
            }
            prop_assert_eq!(expected, 0);
        }
    }
}

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::ops::Index;

use crate::error::{Error, Result};
use crate::raw::{Arena, Handle, Node, Side};

mod iter;

pub use iter::{Iter, ReverseInOrder};

/// An unbalanced binary search tree with arena-backed nodes.
///
/// Keys are unique: [`insert`](BinarySearchTree::insert) rejects a key that is
/// already present instead of overwriting it. Nothing rebalances the tree, so
/// its shape is determined entirely by insertion order. Inserting sorted keys one
/// at a time degenerates into a list; build from a batch with
/// [`BalancedBst`](crate::BalancedBst) to get a tree of logarithmic height.
///
/// # Examples
///
/// ```
/// use balanced_bst::{BinarySearchTree, Error};
///
/// let mut tree = BinarySearchTree::new();
/// tree.insert(2, "b")?;
/// tree.insert(1, "a")?;
/// tree.insert(3, "c")?;
///
/// assert_eq!(tree.get(&1), Some(&"a"));
/// assert_eq!(tree.insert(2, "z"), Err(Error::DuplicateKey));
/// assert_eq!(tree.height(), 2);
///
/// let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, [1, 2, 3]);
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone)]
pub struct BinarySearchTree<K, I> {
    nodes: Arena<Node<K, I>>,
    root: Option<Handle>,
}

/// A read-only view of one node of a [`BinarySearchTree`].
///
/// Obtained from [`BinarySearchTree::root`] or yielded by [`ReverseInOrder`].
pub struct NodeRef<'a, K, I> {
    tree: &'a BinarySearchTree<K, I>,
    handle: Handle,
}

impl<'a, K, I> NodeRef<'a, K, I> {
    pub(crate) const fn new(tree: &'a BinarySearchTree<K, I>, handle: Handle) -> Self {
        Self { tree, handle }
    }

    fn node(&self) -> &'a Node<K, I> {
        self.tree.node(self.handle)
    }

    /// The node's key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.node().key()
    }

    /// The node's item.
    #[must_use]
    pub fn item(&self) -> &'a I {
        self.node().item()
    }

    /// The key and item together.
    #[must_use]
    pub fn entry(&self) -> (&'a K, &'a I) {
        let node = self.node();
        (node.key(), node.item())
    }

    /// Root of the left subtree, holding every smaller key.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.node().left().map(|handle| Self::new(self.tree, handle))
    }

    /// Root of the right subtree, holding every larger key.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.node().right().map(|handle| Self::new(self.tree, handle))
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
}

impl<K, I> Clone for NodeRef<'_, K, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, I> Copy for NodeRef<'_, K, I> {}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for NodeRef<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef").field("key", self.key()).field("item", self.item()).finish()
    }
}

impl<K, I> BinarySearchTree<K, I> {
    /// Makes a new, empty tree. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<u32, &str> = BinarySearchTree::new();
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Makes a new, empty tree with room for at least `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Number of nodes the tree can hold before reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of key/item pairs in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// The root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, I>> {
        self.root.map(|handle| NodeRef::new(self, handle))
    }

    /// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
    ///
    /// # Complexity
    ///
    /// O(n) time, O(height) extra space. Walks with an explicit stack, so a
    /// degenerate tree does not deepen the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// for key in 0..4 {
    ///     tree.insert(key, ()).unwrap();
    /// }
    /// // Sequential insertion of sorted keys builds a list.
    /// assert_eq!(tree.height(), 4);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((handle, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            pending.extend(node.left().map(|child| (child, depth + 1)));
            pending.extend(node.right().map(|child| (child, depth + 1)));
        }

        height
    }

    /// Ascending in-order iterator over `(key, item)` pairs.
    pub fn iter(&self) -> Iter<'_, K, I> {
        Iter::new(self)
    }

    /// Descending in-order iterator over the tree's nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// for key in [2, 1, 3] {
    ///     tree.insert(key, key * 10).unwrap();
    /// }
    /// let items: Vec<_> = tree.rev_iter().map(|node| *node.item()).collect();
    /// assert_eq!(items, [30, 20, 10]);
    /// ```
    pub fn rev_iter(&self) -> ReverseInOrder<'_, K, I> {
        ReverseInOrder::new(self)
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, I> {
        self.nodes.get(handle)
    }

    pub(crate) const fn root_handle(&self) -> Option<Handle> {
        self.root
    }

    /// Points the parent's `side` link, or the root if there is no parent, at `child`.
    fn relink(&mut self, parent: Option<(Handle, Side)>, child: Option<Handle>) {
        match parent {
            Some((handle, side)) => self.nodes.get_mut(handle).set_child(side, child),
            None => self.root = child,
        }
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// Smallest key and its item.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &I)> {
        let node = self.node(self.leftmost(self.root?));
        Some((node.key(), node.item()))
    }

    /// Largest key and its item.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &I)> {
        let node = self.node(self.rightmost(self.root?));
        Some((node.key(), node.item()))
    }
}

impl<K: Ord, I> BinarySearchTree<K, I> {
    /// Inserts `key` with `item`.
    ///
    /// The new node always becomes a leaf; existing nodes never move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if `key` is already present. The tree is
    /// left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds the maximum number of nodes.
    ///
    /// # Complexity
    ///
    /// O(height): O(log n) for a balanced tree, O(n) worst case.
    pub fn insert(&mut self, key: K, item: I) -> Result<()> {
        let mut parent = None;
        let mut cursor = self.root;

        while let Some(handle) = cursor {
            let node = self.node(handle);
            let side = match key.cmp(node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    log::debug!("rejecting duplicate key");
                    return Err(Error::DuplicateKey);
                }
            };
            parent = Some((handle, side));
            cursor = node.child(side);
        }

        let leaf = self.nodes.alloc(Node::new(key, item));
        self.relink(parent, Some(leaf));
        Ok(())
    }

    fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            cursor = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns a reference to the item stored under `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&I>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.node(handle).item())
    }

    /// Returns the stored key and its item.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &I)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.node(self.search(key)?);
        Some((node.key(), node.item()))
    }

    /// Returns a mutable reference to the item stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert("gold", 1).unwrap();
    /// if let Some(count) = tree.get_mut("gold") {
    ///     *count += 1;
    /// }
    /// assert_eq!(tree["gold"], 2);
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut I>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).item_mut())
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Smallest key strictly greater than `key`, with its item.
    ///
    /// `key` itself does not have to be present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// for key in [10, 20, 30] {
    ///     tree.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(tree.successor(&20).map(|(k, _)| *k), Some(30));
    /// assert_eq!(tree.successor(&25).map(|(k, _)| *k), Some(30));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    #[must_use]
    pub fn successor<Q>(&self, key: &Q) -> Option<(&K, &I)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            if key < node.key().borrow() {
                best = Some(node);
                cursor = node.left();
            } else {
                cursor = node.right();
            }
        }
        best.map(|node| (node.key(), node.item()))
    }

    /// Removes `key` and returns its item.
    ///
    /// A node with two children takes over the key and item of its in-order
    /// successor, which is unlinked from the right subtree instead.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<I>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut parent = None;
        let mut cursor = self.root;
        let target = loop {
            let handle = cursor?;
            let node = self.node(handle);
            let side = match key.cmp(node.key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break handle,
            };
            parent = Some((handle, side));
            cursor = node.child(side);
        };

        let node = self.node(target);
        match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let mut successor_parent = (target, Side::Right);
                let mut successor = right;
                while let Some(left) = self.node(successor).left() {
                    successor_parent = (successor, Side::Left);
                    successor = left;
                }

                let successor_right = self.node(successor).right();
                self.relink(Some(successor_parent), successor_right);
                let (key, item) = self.nodes.take(successor).into_entry();
                let (_, removed) = self.nodes.get_mut(target).replace_entry(key, item);
                Some(removed)
            }
            (child, None) | (None, child) => {
                self.relink(parent, child);
                let (_, removed) = self.nodes.take(target).into_entry();
                Some(removed)
            }
        }
    }
}

impl<K, I> Default for BinarySearchTree<K, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for BinarySearchTree<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, I> IntoIterator for &'a BinarySearchTree<K, I> {
    type Item = (&'a K, &'a I);
    type IntoIter = Iter<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q, I> Index<&Q> for BinarySearchTree<K, I>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = I;

    /// # Panics
    ///
    /// Panics if the key is not present in the tree.
    fn index(&self, key: &Q) -> &I {
        self.get(key).expect("no entry found for key")
    }
}

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use crate::bst::{BinarySearchTree, NodeRef, ReverseInOrder};
use crate::error::{Error, Result};

mod build;

pub use build::BuildStrategy;

/// A binary search tree built balanced from a batch of pairs known up front.
///
/// Construction sorts the batch with a stable merge sort, then inserts the
/// median of the sorted sequence, then recursively the medians of the ranges to
/// its left and to its right. Each median becomes the root of its subtree, so a
/// batch of `n` unique keys yields a tree of height `⌈log₂(n + 1)⌉` regardless of
/// the input order. Building costs O(n log n).
///
/// Balance is only guaranteed at construction. Later [`insert`](BalancedBst::insert)
/// calls go through the plain tree insertion and can unbalance it.
///
/// Iterating a `BalancedBst` walks it in **descending** key order with
/// [`ReverseInOrder`]; ascending order is available through
/// [`as_tree`](BalancedBst::as_tree).
///
/// # Examples
///
/// ```
/// use balanced_bst::BalancedBst;
///
/// let tree = BalancedBst::build(vec![(5, "e"), (1, "a"), (3, "c"), (2, "b"), (4, "d")])?;
/// assert_eq!(tree.root().map(|root| *root.key()), Some(3));
/// assert_eq!(tree.height(), 3);
///
/// let keys: Vec<_> = tree.iter().map(|node| *node.key()).collect();
/// assert_eq!(keys, [5, 4, 3, 2, 1]);
/// # Ok::<(), balanced_bst::Error>(())
/// ```
///
/// Duplicate keys abort the build:
///
/// ```
/// use balanced_bst::{BalancedBst, Error};
///
/// let result = BalancedBst::build([(1, "a"), (1, "b")]);
/// assert_eq!(result.unwrap_err(), Error::DuplicateKey);
/// ```
#[derive(Clone)]
pub struct BalancedBst<K, I> {
    tree: BinarySearchTree<K, I>,
}

impl<K: Ord, I> BalancedBst<K, I> {
    /// Builds a balanced tree from `batch` with the default [`BuildStrategy`].
    ///
    /// An empty batch yields an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if two pairs share a key. The partially
    /// built tree is discarded.
    ///
    /// # Panics
    ///
    /// Panics if the batch holds more pairs than a tree can address.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    pub fn build(batch: impl IntoIterator<Item = (K, I)>) -> Result<Self> {
        Self::build_with(batch, BuildStrategy::default())
    }

    /// Builds a balanced tree from `batch`, walking the sorted pairs with `strategy`.
    ///
    /// The resulting tree is identical for every strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if two pairs share a key.
    ///
    /// # Panics
    ///
    /// Panics if the batch holds more pairs than a tree can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{BalancedBst, BuildStrategy};
    ///
    /// let batch: Vec<_> = (0..1000).map(|k| (k, k)).collect();
    /// let tree = BalancedBst::build_with(batch, BuildStrategy::WorkList)?;
    /// assert_eq!(tree.len(), 1000);
    /// assert_eq!(tree.height(), 10);
    /// # Ok::<(), balanced_bst::Error>(())
    /// ```
    pub fn build_with(batch: impl IntoIterator<Item = (K, I)>, strategy: BuildStrategy) -> Result<Self> {
        let batch: Vec<(K, I)> = batch.into_iter().collect();
        log::debug!("building balanced tree from {} pairs ({strategy:?})", batch.len());

        let mut tree = BinarySearchTree::with_capacity(batch.len());
        if let Err(err) = build::insert_balanced(&mut tree, batch, strategy) {
            log::debug!("balanced build aborted after {} insertions: {err}", tree.len());
            return Err(err);
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("built balanced tree: {} nodes, height {}", tree.len(), tree.height());
        }
        Ok(Self { tree })
    }

    /// Inserts a single pair into the already-built tree.
    ///
    /// No rebalancing happens; see the type-level documentation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if `key` is already present.
    pub fn insert(&mut self, key: K, item: I) -> Result<()> {
        self.tree.insert(key, item)
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&I>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.get(key)
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains_key(key)
    }
}

impl<K, I> BalancedBst<K, I> {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, I>> {
        self.tree.root()
    }

    /// Descending in-order iterator over the tree's nodes.
    pub fn iter(&self) -> ReverseInOrder<'_, K, I> {
        self.tree.rev_iter()
    }

    /// The underlying tree, for ascending iteration and the rest of its API.
    #[must_use]
    pub const fn as_tree(&self) -> &BinarySearchTree<K, I> {
        &self.tree
    }

    #[must_use]
    pub fn into_tree(self) -> BinarySearchTree<K, I> {
        self.tree
    }
}

impl<'a, K, I> IntoIterator for &'a BalancedBst<K, I> {
    type Item = NodeRef<'a, K, I>;
    type IntoIter = ReverseInOrder<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, I> TryFrom<Vec<(K, I)>> for BalancedBst<K, I> {
    type Error = Error;

    fn try_from(batch: Vec<(K, I)>) -> Result<Self> {
        Self::build(batch)
    }
}

impl<K: Ord, I, const N: usize> TryFrom<[(K, I); N]> for BalancedBst<K, I> {
    type Error = Error;

    fn try_from(batch: [(K, I); N]) -> Result<Self> {
        Self::build(batch)
    }
}

impl<K, I> From<BalancedBst<K, I>> for BinarySearchTree<K, I> {
    fn from(balanced: BalancedBst<K, I>) -> Self {
        balanced.tree
    }
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for BalancedBst<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancedBst").field("tree", &self.tree).finish()
    }
}

//! Balanced binary search tree construction from a known batch of pairs.
//!
//! Inserting already-sorted keys one at a time into a plain binary search tree
//! produces a list of height `n`. When every pair is known up front this crate
//! avoids that: [`BalancedBst::build`] sorts the batch and inserts medians first,
//! which yields a tree of height `⌈log₂(n + 1)⌉` in O(n log n) time.
//!
//! - [`BalancedBst`] - the median-first builder and its descending iteration
//! - [`BinarySearchTree`] - the underlying arena-backed, unbalanced tree
//! - [`ReverseInOrder`] - a resumable largest-to-smallest iterator driven by an explicit stack
//! - [`sort`] - the stable merge sort used by the builder
//!
//! # Example
//!
//! ```
//! use balanced_bst::BalancedBst;
//!
//! let tree = BalancedBst::build(vec![(5, "e"), (1, "a"), (3, "c"), (2, "b"), (4, "d")])?;
//!
//! // Medians first: 3 at the root, the tree is as shallow as possible.
//! assert_eq!(tree.root().map(|root| *root.key()), Some(3));
//! assert_eq!(tree.height(), 3);
//!
//! // Iterating a `BalancedBst` goes from the largest key to the smallest.
//! let items: Vec<_> = tree.iter().map(|node| *node.item()).collect();
//! assert_eq!(items, ["e", "d", "c", "b", "a"]);
//! # Ok::<(), balanced_bst::Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Duplicate keys are rejected** - Both single inserts and batch builds return [`Error::DuplicateKey`]
//! - **No recursion while iterating** - Iterator memory is bounded by the tree height
//!
//! Balance holds only at construction time. The tree does not rebalance after
//! later inserts or removals.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod balanced;
pub mod bst;
pub mod sort;

pub use balanced::{BalancedBst, BuildStrategy};
pub use bst::{BinarySearchTree, Iter, NodeRef, ReverseInOrder};
pub use error::{Error, Result};

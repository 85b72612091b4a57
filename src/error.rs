use thiserror::Error;

/// Errors returned by tree construction and insertion.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key being inserted is already present in the tree.
    ///
    /// [`BinarySearchTree::insert`](crate::BinarySearchTree::insert) never overwrites.
    /// During a batch build this aborts the whole construction.
    #[error("inserting duplicate key")]
    DuplicateKey,
}

/// A `Result` alias using the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

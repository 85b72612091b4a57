use alloc::vec::Vec;
use core::ops::Range;

use smallvec::SmallVec;

use crate::bst::BinarySearchTree;
use crate::error::Result;
use crate::sort::merge_sort_by;

/// How the median-first insertion walks the sorted batch.
///
/// Both strategies insert pairs in exactly the same sequence: the median of a
/// range, then every pair of the range left of it, then every pair right of it.
/// They differ only in where the pending ranges are kept.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum BuildStrategy {
    /// Recurse once per range. Call depth is bounded by the resulting height.
    #[default]
    Recursive,
    /// Keep pending ranges on an explicit stack instead of the call stack.
    WorkList,
}

/// Pairs of the sorted batch that have not been inserted yet.
type Slots<K, I> = [Option<(K, I)>];

/// Sorts `batch` by key and inserts it into `tree` median-first.
pub(crate) fn insert_balanced<K: Ord, I>(
    tree: &mut BinarySearchTree<K, I>,
    batch: Vec<(K, I)>,
    strategy: BuildStrategy,
) -> Result<()> {
    let sorted = merge_sort_by(batch, |a, b| a.0.cmp(&b.0));
    let mut slots: Vec<Option<(K, I)>> = sorted.into_iter().map(Some).collect();

    match strategy {
        BuildStrategy::Recursive => insert_medians(tree, &mut slots),
        BuildStrategy::WorkList => insert_medians_with_stack(tree, &mut slots),
    }
}

fn take_slot<K, I>(slot: &mut Option<(K, I)>) -> (K, I) {
    slot.take().expect("every slot is inserted exactly once")
}

fn insert_medians<K: Ord, I>(tree: &mut BinarySearchTree<K, I>, slots: &mut Slots<K, I>) -> Result<()> {
    if slots.is_empty() {
        return Ok(());
    }

    let mid = slots.len() / 2;
    let (key, item) = take_slot(&mut slots[mid]);
    log::trace!("inserting median {mid} of {}", slots.len());
    tree.insert(key, item)?;

    let (lower, upper) = slots.split_at_mut(mid);
    insert_medians(tree, lower)?;
    insert_medians(tree, &mut upper[1..])
}

fn insert_medians_with_stack<K: Ord, I>(tree: &mut BinarySearchTree<K, I>, slots: &mut Slots<K, I>) -> Result<()> {
    // At most two ranges are pushed per level, so this stays O(height).
    let mut pending: SmallVec<[Range<usize>; 64]> = SmallVec::new();
    pending.push(0..slots.len());

    while let Some(range) = pending.pop() {
        if range.is_empty() {
            continue;
        }

        let mid = range.start + range.len() / 2;
        let (key, item) = take_slot(&mut slots[mid]);
        log::trace!("inserting median {mid} of {range:?}");
        tree.insert(key, item)?;

        // Upper range first so the lower one is popped, and finished, before it.
        pending.push(mid + 1..range.end);
        pending.push(range.start..mid);
    }

    Ok(())
}

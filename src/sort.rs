//! Stable top-down merge sort over owned vectors.
//!
//! The balanced builder only needs a stable comparison sort with an O(n log n)
//! worst case; these functions provide it without requiring `T: Clone`.

use alloc::vec::Vec;
use core::cmp::Ordering;

/// Sorts `items` with the comparator `compare`, returning a new vector.
///
/// The sort is stable: elements that compare equal keep their input order.
///
/// # Complexity
///
/// O(n log n) comparisons in every case, recursion depth O(log n).
///
/// # Examples
///
/// ```
/// use balanced_bst::sort::merge_sort_by;
///
/// let sorted = merge_sort_by(vec![3, 1, 2], |a, b| b.cmp(a));
/// assert_eq!(sorted, [3, 2, 1]);
/// ```
#[must_use]
pub fn merge_sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_run(items, &mut compare)
}

/// Sorts `items` ascending by the key that `key` extracts, returning a new vector.
///
/// The sort is stable: elements with equal keys keep their input order.
///
/// # Complexity
///
/// O(n log n) comparisons in every case; `key` is called twice per comparison.
///
/// # Examples
///
/// ```
/// use balanced_bst::sort::merge_sort_by_key;
///
/// let pairs = vec![(2, "b"), (1, "x"), (2, "a"), (1, "y")];
/// let sorted = merge_sort_by_key(pairs, |pair| pair.0);
/// assert_eq!(sorted, [(1, "x"), (1, "y"), (2, "b"), (2, "a")]);
/// ```
#[must_use]
pub fn merge_sort_by_key<T, B, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    B: Ord,
    F: FnMut(&T) -> B,
{
    merge_sort_by(items, |a, b| key(a).cmp(&key(b)))
}

fn sort_run<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let upper = items.split_off(items.len() / 2);
    let lower = sort_run(items, compare);
    let upper = sort_run(upper, compare);
    merge(lower, upper, compare)
}

fn merge<T, F>(lower: Vec<T>, upper: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(lower.len() + upper.len());
    let mut lower = lower.into_iter().peekable();
    let mut upper = upper.into_iter().peekable();

    loop {
        // Ties go to the lower run.
        let take_upper = match (lower.peek(), upper.peek()) {
            (Some(l), Some(u)) => compare(u, l) == Ordering::Less,
            _ => break,
        };
        let next = if take_upper { upper.next() } else { lower.next() };
        merged.extend(next);
    }

    merged.extend(lower);
    merged.extend(upper);
    merged
}

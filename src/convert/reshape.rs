//! Reshaping primitives: slicing, reversing, flipping and deduplicating.
//!
//! These back the corresponding [`Stream`](crate::monad::Stream) stages.
//! Wherever keys are renumbered, only integer keys are; string keys are
//! always kept.

use std::cmp::Ordering;

use super::sort::stable_sort_by;
use super::to_array;
use crate::value::{Key, SortFlags, Traversable, Value};

fn append(target: &mut Traversable, key: Key, value: Value, preserve_keys: bool) {
    if preserve_keys || key.is_name() {
        target.insert(key, value);
    } else {
        target.push(value);
    }
}

/// Extracts a contiguous run of entries from the normalized input.
///
/// A negative `offset` counts from the end. A `length` of `None` runs to the
/// end, a negative `length` stops that many entries before the end.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_slice;
/// use traverso::traversable;
///
/// let input = traversable![10, 20, 30, 40, 50];
/// assert_eq!(traversable_slice(input.clone(), 1, Some(2), false), traversable![20, 30]);
/// assert_eq!(traversable_slice(input.clone(), 1, Some(2), true), traversable![1 => 20, 2 => 30]);
/// assert_eq!(traversable_slice(input.clone(), -2, None, false), traversable![40, 50]);
/// assert_eq!(traversable_slice(input, 1, Some(-1), false), traversable![20, 30, 40]);
/// ```
pub fn traversable_slice(
    input: impl Into<Value>,
    offset: i64,
    length: Option<i64>,
    preserve_keys: bool,
) -> Traversable {
    let source = to_array(input, false);
    let count = i64::try_from(source.len()).unwrap_or(i64::MAX);
    let start = if offset < 0 {
        count.saturating_add(offset).max(0)
    } else {
        offset.min(count)
    };
    let end = match length {
        None => count,
        Some(length) if length < 0 => count.saturating_add(length),
        Some(length) => start.saturating_add(length).min(count),
    };
    let mut sliced = Traversable::new();
    if end <= start {
        return sliced;
    }
    // both bounds lie within 0..=len here
    let skip = usize::try_from(start).unwrap_or(usize::MAX);
    let take = usize::try_from(end - start).unwrap_or(0);
    for (key, value) in source.into_iter().skip(skip).take(take) {
        append(&mut sliced, key, value, preserve_keys);
    }
    sliced
}

/// Reverses the order of the entries of the normalized input.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_reverse;
/// use traverso::traversable;
///
/// let input = traversable!["x" => 1, 0 => 2, 1 => 3];
/// assert_eq!(traversable_reverse(input.clone(), false), traversable![0 => 3, 1 => 2, "x" => 1]);
/// assert_eq!(traversable_reverse(input, true), traversable![1 => 3, 0 => 2, "x" => 1]);
/// ```
pub fn traversable_reverse(input: impl Into<Value>, preserve_keys: bool) -> Traversable {
    let mut reversed = Traversable::new();
    for (key, value) in to_array(input, false).into_iter().rev() {
        append(&mut reversed, key, value, preserve_keys);
    }
    reversed
}

/// Exchanges keys and values of the normalized input.
///
/// Only integers and strings can become keys; other values are skipped.
/// When several entries hold the same value, the last one wins.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_flip;
/// use traverso::traversable;
///
/// let flipped = traversable_flip(traversable!["a" => 1, "b" => "x", "c" => 1.5]);
/// assert_eq!(flipped, traversable![1 => "a", "x" => "b"]);
/// ```
pub fn traversable_flip(input: impl Into<Value>) -> Traversable {
    let mut flipped = Traversable::new();
    for (key, value) in to_array(input, false) {
        match value.to_key() {
            Some(new_key) => {
                flipped.insert(new_key, key);
            }
            None => {
                tracing::warn!(
                    key = %key,
                    value_type = value.type_name(),
                    "flip skipped a value that cannot become a key"
                );
            }
        }
    }
    flipped
}

/// Removes duplicate values from the normalized input.
///
/// Two values are duplicates when `flags` compares them as equal. The first
/// occurrence is kept, under its key and at its position.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_unique;
/// use traverso::traversable;
/// use traverso::value::SortFlags;
///
/// let input = traversable!["a" => 1, "b" => "1", "c" => 2, "d" => 1.0];
/// assert_eq!(traversable_unique(input, SortFlags::Regular), traversable!["a" => 1, "c" => 2]);
/// ```
pub fn traversable_unique(input: impl Into<Value>, flags: SortFlags) -> Traversable {
    let source = to_array(input, false);
    let entries: Vec<(Key, Value)> = source.into_entries();

    let order = stable_sort_by((0..entries.len()).collect(), &mut |left: &usize, right: &usize| {
        flags.compare(&entries[*left].1, &entries[*right].1)
    });

    let mut duplicate = vec![false; entries.len()];
    let mut leader: Option<usize> = None;
    for &position in &order {
        match leader {
            Some(first) if flags.compare(&entries[first].1, &entries[position].1) == Ordering::Equal => {
                duplicate[position] = true;
            }
            _ => leader = Some(position),
        }
    }

    entries
        .into_iter()
        .zip(duplicate)
        .filter_map(|(entry, is_duplicate)| (!is_duplicate).then_some(entry))
        .collect()
}

/// Returns the values of the normalized input re-indexed `0..n`.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_values;
/// use traverso::traversable;
///
/// assert_eq!(traversable_values(traversable!["a" => 1, 7 => 2]), traversable![1, 2]);
/// ```
pub fn traversable_values(input: impl Into<Value>) -> Traversable {
    Traversable::from_values(to_array(input, false).into_values())
}

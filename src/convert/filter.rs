//! Filtering traversables.

use super::to_array;
use crate::value::{Key, Traversable, Value};

/// Keeps the values of the normalized input for which `predicate` holds.
///
/// Order is preserved. With `preserve_keys` the kept values stay under their
/// keys, otherwise they are re-indexed `0..n`.
///
/// # Arguments
///
/// * `predicate` - Receives `(&value, &key)`
/// * `input` - Any value; normalized with [`to_array`]
/// * `preserve_keys` - Whether the input keys are kept
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_filter;
/// use traverso::traversable;
/// use traverso::value::{Key, Value};
///
/// fn even(value: &Value, _: &Key) -> bool {
///     value.as_i64().is_some_and(|n| n % 2 == 0)
/// }
///
/// assert_eq!(traversable_filter(even, traversable![1, 2, 3, 4], true), traversable![1 => 2, 3 => 4]);
/// assert_eq!(traversable_filter(even, traversable![1, 2, 3, 4], false), traversable![2, 4]);
/// ```
pub fn traversable_filter<F>(mut predicate: F, input: impl Into<Value>, preserve_keys: bool) -> Traversable
where
    F: FnMut(&Value, &Key) -> bool,
{
    let mut filtered = Traversable::new();
    for (key, value) in to_array(input, false) {
        if !predicate(&value, &key) {
            continue;
        }
        if preserve_keys {
            filtered.insert(key, value);
        } else {
            filtered.push(value);
        }
    }
    filtered
}

/// Fallible [`traversable_filter`]: stops at the first error and returns it.
///
/// # Errors
///
/// Returns the first error produced by `predicate`, unchanged.
pub fn try_traversable_filter<F, E>(
    mut predicate: F,
    input: impl Into<Value>,
    preserve_keys: bool,
) -> Result<Traversable, E>
where
    F: FnMut(&Value, &Key) -> Result<bool, E>,
{
    let mut filtered = Traversable::new();
    for (key, value) in to_array(input, false) {
        if !predicate(&value, &key)? {
            continue;
        }
        if preserve_keys {
            filtered.insert(key, value);
        } else {
            filtered.push(value);
        }
    }
    Ok(filtered)
}

//! Merging, walking and shuffling traversables.

use rand::Rng;
use rand::seq::SliceRandom;

use super::to_array;
use crate::value::{Key, Traversable, Value};

/// Merges the normalized inputs, left to right.
///
/// Integer keys are renumbered (values are appended); a string key already
/// present is overwritten in place by the later value.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_merge;
/// use traverso::traversable;
///
/// let merged = traversable_merge([
///     traversable![5 => "a", "name" => "first"],
///     traversable![9 => "b", "name" => "second"],
/// ]);
/// assert_eq!(merged, traversable![0 => "a", "name" => "second", 1 => "b"]);
/// ```
pub fn traversable_merge<I>(inputs: I) -> Traversable
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut merged = Traversable::new();
    for input in inputs {
        for (key, value) in to_array(input, false) {
            match key {
                Key::Index(_) => {
                    merged.push(value);
                }
                Key::Name(_) => {
                    merged.insert(key, value);
                }
            }
        }
    }
    merged
}

/// Calls `action(&value, &key)` for every entry of the normalized input.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_walk;
/// use traverso::traversable;
///
/// let mut seen = Vec::new();
/// traversable_walk(|value, key| seen.push(format!("{key}={value}")), traversable!["a" => 1, "b" => 2]);
/// assert_eq!(seen, vec!["a=1", "b=2"]);
/// ```
pub fn traversable_walk<F>(mut action: F, input: impl Into<Value>)
where
    F: FnMut(&Value, &Key),
{
    for (key, value) in to_array(input, false).iter() {
        action(value, key);
    }
}

/// Shuffles the values of the normalized input using the thread-local
/// random generator. The result is a list.
pub fn traversable_randomize(input: impl Into<Value>) -> Traversable {
    traversable_randomize_with(input, &mut rand::rng())
}

/// Shuffles the values of the normalized input with the given generator.
/// The result is a list.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use traverso::convert::{traversable_randomize_with, traversable_sort};
/// use traverso::traversable;
/// use traverso::value::SortFlags;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let shuffled = traversable_randomize_with(traversable!["a" => 1, "b" => 2, "c" => 3], &mut rng);
/// assert!(shuffled.is_list());
/// assert_eq!(traversable_sort(SortFlags::Regular, shuffled), traversable![1, 2, 3]);
/// ```
pub fn traversable_randomize_with<R>(input: impl Into<Value>, rng: &mut R) -> Traversable
where
    R: Rng + ?Sized,
{
    let mut values = to_array(input, false).into_values();
    values.shuffle(rng);
    Traversable::from_values(values)
}

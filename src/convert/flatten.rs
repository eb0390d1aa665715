//! Flattening nested traversables.

use super::to_array;
use crate::value::{Traversable, Value};

/// Recursively inlines nested traversables (arrays and iterable objects),
/// depth-first, left to right.
///
/// Without `preserve_keys` the result is a list. With `preserve_keys` every
/// leaf is assigned under its own key: a later leaf under an existing key
/// overwrites the earlier value, which keeps its position.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_flatten;
/// use traverso::traversable;
///
/// let nested = traversable![1, traversable![2, traversable![3, 4]], 5];
/// assert_eq!(traversable_flatten(nested, false), traversable![1, 2, 3, 4, 5]);
///
/// let keyed = traversable!["a" => 1, "inner" => traversable!["b" => 2, "a" => 3]];
/// assert_eq!(traversable_flatten(keyed, true), traversable!["a" => 3, "b" => 2]);
/// ```
pub fn traversable_flatten(input: impl Into<Value>, preserve_keys: bool) -> Traversable {
    let mut flat = Traversable::new();
    flatten_into(&mut flat, to_array(input, false), preserve_keys);
    flat
}

fn flatten_into(flat: &mut Traversable, source: Traversable, preserve_keys: bool) {
    for (key, value) in source {
        if value.is_traversable() {
            flatten_into(flat, to_array(value, false), preserve_keys);
        } else if preserve_keys {
            flat.insert(key, value);
        } else {
            flat.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversable;
    use crate::value::{Collection, Record};
    use rstest::rstest;

    #[rstest]
    fn flatten_inlines_iterable_objects() {
        let collection = Collection::new(traversable![2, 3]).into_value();
        let input = traversable![1, collection, traversable![]];
        assert_eq!(traversable_flatten(input, false), traversable![1, 2, 3]);
    }

    #[rstest]
    fn flatten_keeps_non_iterable_objects_as_leaves() {
        let record = Record::new("Leaf").into_value();
        let input = traversable![traversable![record.clone()]];
        assert_eq!(traversable_flatten(input, false), traversable![record]);
    }

    #[rstest]
    fn flatten_with_keys_overwrites_in_place() {
        let input = traversable![10, traversable![20, 30], 40];
        // 0 => 10, then 0 => 20 and 1 => 30 from the inner list, then 2 => 40
        assert_eq!(traversable_flatten(input, true), traversable![20, 30, 40]);
    }

    #[rstest]
    #[case(Value::Null, traversable![])]
    #[case(Value::from("abc"), traversable!["abc"])]
    fn flatten_normalizes_input(#[case] input: Value, #[case] expected: Traversable) {
        assert_eq!(traversable_flatten(input, false), expected);
    }
}

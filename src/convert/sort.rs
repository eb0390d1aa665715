//! Sorting traversables.

use std::cmp::Ordering;

use super::to_array;
use crate::value::{SortFlags, Traversable, Value};

/// Sorts the values of the normalized input with a built-in ordering.
///
/// The sort is stable; keys are discarded and the result is a list.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_sort;
/// use traverso::traversable;
/// use traverso::value::SortFlags;
///
/// let input = traversable!["b" => "10", "a" => "9", "c" => "1"];
/// assert_eq!(traversable_sort(SortFlags::Regular, input.clone()), traversable!["1", "9", "10"]);
/// assert_eq!(traversable_sort(SortFlags::String, input), traversable!["1", "10", "9"]);
/// ```
pub fn traversable_sort(flags: SortFlags, input: impl Into<Value>) -> Traversable {
    traversable_sort_by(|left, right| flags.compare(left, right), input)
}

/// Sorts the values of the normalized input with a caller comparator.
///
/// The sort is stable; keys are discarded and the result is a list.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_sort_by;
/// use traverso::traversable;
/// use traverso::value::SortFlags;
///
/// let descending = traversable_sort_by(
///     |left, right| SortFlags::Regular.compare(right, left),
///     traversable![2, 3, 1],
/// );
/// assert_eq!(descending, traversable![3, 2, 1]);
/// ```
pub fn traversable_sort_by<F>(mut comparator: F, input: impl Into<Value>) -> Traversable
where
    F: FnMut(&Value, &Value) -> Ordering,
{
    let values = to_array(input, false).into_values();
    Traversable::from_values(stable_sort_by(values, &mut comparator))
}

/// Stable merge sort that accepts comparators which are not a total order.
///
/// Loose comparison of mixed values is not transitive (`true == 7`,
/// `true == "a"`, `7 < "a"`) and NaN is equal to everything, so
/// `slice::sort_by` may panic on them. This sort never checks consistency:
/// an inconsistent comparator yields some permutation of the input.
pub(crate) fn stable_sort_by<T, F>(items: Vec<T>, comparator: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = stable_sort_by(left, comparator);
    let right = stable_sort_by(right, comparator);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(first), Some(second)) => comparator(second, first) == Ordering::Less,
            _ => break,
        };
        if take_right {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversable;
    use rstest::rstest;

    #[rstest]
    #[case(SortFlags::Regular, traversable![3, "20", 1.5], traversable![1.5, 3, "20"])]
    #[case(SortFlags::Natural, traversable!["img12", "img10", "img2"], traversable!["img2", "img10", "img12"])]
    #[case(SortFlags::StringCaseInsensitive, traversable!["b", "A", "c"], traversable!["A", "b", "c"])]
    fn sort_with_flags(#[case] flags: SortFlags, #[case] input: Traversable, #[case] expected: Traversable) {
        assert_eq!(traversable_sort(flags, input), expected);
    }

    #[rstest]
    fn sort_by_is_stable() {
        let input = traversable![
            traversable!["rank" => 1, "name" => "first"],
            traversable!["rank" => 0, "name" => "second"],
            traversable!["rank" => 1, "name" => "third"],
        ];
        let rank = |value: &Value| {
            value
                .as_traversable()
                .and_then(|row| row.get(&"rank".into()))
                .and_then(Value::as_i64)
                .unwrap_or(0)
        };
        let sorted = traversable_sort_by(|left, right| rank(left).cmp(&rank(right)), input);
        let names: Vec<String> = sorted
            .values()
            .filter_map(|row| row.as_traversable()?.get(&"name".into()).map(ToString::to_string))
            .collect();
        assert_eq!(names, vec!["second", "first", "third"]);
    }

    fn mixed_values(length: usize) -> Traversable {
        let pool = [
            Value::Bool(true),
            Value::Bool(false),
            Value::Int(7),
            Value::Int(-3),
            Value::from("a"),
            Value::from("10"),
            Value::Null,
            Value::Float(f64::NAN),
            Value::Float(2.5),
        ];
        (0..length).map(|index| pool[(index * 7 + index / 3) % pool.len()].clone()).collect()
    }

    #[rstest]
    #[case(SortFlags::Regular)]
    #[case(SortFlags::Numeric)]
    #[case(SortFlags::Natural)]
    fn sorting_mixed_values_keeps_every_value(#[case] flags: SortFlags) {
        for length in [0, 1, 2, 17, 40, 200] {
            let input = mixed_values(length);
            let sorted = traversable_sort(flags, input.clone());
            assert_eq!(sorted.len(), input.len());
            for value in input.values() {
                let expected = input.values().filter(|other| other.to_string() == value.to_string()).count();
                let found = sorted.values().filter(|other| other.to_string() == value.to_string()).count();
                assert_eq!(found, expected);
            }
        }
    }

    #[rstest]
    fn inconsistent_comparator_does_not_panic() {
        let flip_flop = |left: &i64, right: &i64| if (left + right) % 3 == 0 { Ordering::Less } else { Ordering::Greater };
        let mut items: Vec<i64> = (0..64).collect();
        items = stable_sort_by(items, &mut |left: &i64, right: &i64| flip_flop(left, right));
        items.sort_unstable();
        assert_eq!(items, (0..64).collect::<Vec<_>>());
    }

    #[rstest]
    fn stable_sort_matches_std_on_total_orders() {
        let items: Vec<(usize, usize)> = (0..50).map(|index| ((index * 37) % 11, index)).collect();
        let mut expected = items.clone();
        expected.sort_by_key(|&(rank, _)| rank);
        let sorted = stable_sort_by(items, &mut |left: &(usize, usize), right: &(usize, usize)| left.0.cmp(&right.0));
        assert_eq!(sorted, expected);
    }
}

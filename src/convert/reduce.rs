//! Folding traversables.

use super::to_array;
use crate::value::{Key, Value};

/// Left fold over the normalized input.
///
/// `callback(accumulator, value, &key)` is applied to every entry in order,
/// starting from `initial`. An empty input yields `initial`.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_reduce;
/// use traverso::traversable;
///
/// let total = traversable_reduce(
///     |sum, value, _| sum + value.as_i64().unwrap_or(0),
///     0,
///     traversable![1, 2, 3],
/// );
/// assert_eq!(total, 6);
///
/// let joined = traversable_reduce(
///     |text: String, _, key| text + &key.to_string(),
///     String::new(),
///     traversable!["a" => 1, "b" => 2],
/// );
/// assert_eq!(joined, "ab");
/// ```
pub fn traversable_reduce<A, F>(mut callback: F, initial: A, input: impl Into<Value>) -> A
where
    F: FnMut(A, Value, &Key) -> A,
{
    to_array(input, false)
        .into_iter()
        .fold(initial, |accumulator, (key, value)| callback(accumulator, value, &key))
}

/// Fallible [`traversable_reduce`]: stops at the first error and returns it.
///
/// # Errors
///
/// Returns the first error produced by `callback`, unchanged.
pub fn try_traversable_reduce<A, F, E>(mut callback: F, initial: A, input: impl Into<Value>) -> Result<A, E>
where
    F: FnMut(A, Value, &Key) -> Result<A, E>,
{
    to_array(input, false)
        .into_iter()
        .try_fold(initial, |accumulator, (key, value)| callback(accumulator, value, &key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversable;
    use rstest::rstest;

    #[rstest]
    fn reduce_of_empty_input_is_initial() {
        let result = traversable_reduce(|_, _, _| Value::from("touched"), Value::from("initial"), Value::Null);
        assert_eq!(result, Value::from("initial"));
    }

    #[rstest]
    fn reduce_is_a_left_fold() {
        let result = traversable_reduce(
            |accumulator: String, value, _| format!("({accumulator}{value})"),
            String::new(),
            traversable!["a", "b", "c"],
        );
        assert_eq!(result, "(((a)b)c)");
    }

    #[rstest]
    fn try_reduce_short_circuits() {
        let mut calls = 0;
        let result = try_traversable_reduce(
            |accumulator: i64, value, _| {
                calls += 1;
                value.as_i64().map(|number| accumulator + number).ok_or(calls)
            },
            0,
            traversable![1, "x", 3],
        );
        assert_eq!(result, Err(2));
        assert_eq!(calls, 2);
    }
}

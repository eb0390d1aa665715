//! Mapping over traversables.

use super::to_array;
use crate::value::{Key, Traversable, Value};

/// Maps every value of the normalized input.
///
/// The mapper receives each value together with its key. With
/// `preserve_keys` the result keeps the input keys, otherwise it is
/// re-indexed `0..n`.
///
/// # Arguments
///
/// * `mapper` - Receives `(value, &key)` and returns the mapped value
/// * `input` - Any value; normalized with [`to_array`]
/// * `preserve_keys` - Whether the input keys are kept
///
/// # Examples
///
/// ```rust
/// use traverso::convert::traversable_map;
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// let doubled = traversable_map(
///     |value, _| Value::Int(value.as_i64().unwrap_or(0) * 2),
///     traversable!["a" => 1, "b" => 2],
///     true,
/// );
/// assert_eq!(doubled, traversable!["a" => 2, "b" => 4]);
///
/// let keys = traversable_map(|_, key| Value::from(key), traversable!["a" => 1, "b" => 2], false);
/// assert_eq!(keys, traversable!["a", "b"]);
/// ```
pub fn traversable_map<F>(mut mapper: F, input: impl Into<Value>, preserve_keys: bool) -> Traversable
where
    F: FnMut(Value, &Key) -> Value,
{
    let source = to_array(input, false);
    let mut mapped = Traversable::with_capacity(source.len());
    for (key, value) in source {
        let value = mapper(value, &key);
        if preserve_keys {
            mapped.insert(key, value);
        } else {
            mapped.push(value);
        }
    }
    mapped
}

/// Fallible [`traversable_map`]: stops at the first error and returns it.
///
/// # Errors
///
/// Returns the first error produced by `mapper`, unchanged.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::try_traversable_map;
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// let parsed = try_traversable_map(
///     |value, _| value.to_string().parse::<i64>().map(Value::Int),
///     traversable!["1", "2"],
///     true,
/// );
/// assert_eq!(parsed, Ok(traversable![1, 2]));
///
/// let failed = try_traversable_map(
///     |value, _| value.to_string().parse::<i64>().map(Value::Int),
///     traversable!["1", "x"],
///     true,
/// );
/// assert!(failed.is_err());
/// ```
pub fn try_traversable_map<F, E>(
    mut mapper: F,
    input: impl Into<Value>,
    preserve_keys: bool,
) -> Result<Traversable, E>
where
    F: FnMut(Value, &Key) -> Result<Value, E>,
{
    let source = to_array(input, false);
    let mut mapped = Traversable::with_capacity(source.len());
    for (key, value) in source {
        let value = mapper(value, &key)?;
        if preserve_keys {
            mapped.insert(key, value);
        } else {
            mapped.push(value);
        }
    }
    Ok(mapped)
}

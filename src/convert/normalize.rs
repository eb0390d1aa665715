//! The traversal normalizer.
//!
//! Every transform primitive and every [`Stream`](crate::monad::Stream)
//! accepts arbitrary input and funnels it through [`to_array`], which maps
//! it onto a [`Traversable`]:
//!
//! | input                          | `collapse_empty = false` | `collapse_empty = true` |
//! |--------------------------------|--------------------------|-------------------------|
//! | `Null`                         | `[]`                     | `[]`                    |
//! | empty scalar (`0`, `""`, ...)  | `[value]`                | `[]`                    |
//! | array                          | the array itself         | the array itself        |
//! | iterable object                | snapshot of its entries  | snapshot of its entries |
//! | anything else                  | `[value]`                | `[value]`               |

use std::sync::Arc;

use crate::value::{Object, Traversable, Value};

/// The classification of a value at the normalizer boundary.
///
/// Capabilities are probed exactly once, here; the normalizer entry points
/// then only match on the shape.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::Shape;
/// use traverso::traversable;
/// use traverso::value::{Collection, Value};
///
/// assert!(matches!(Shape::of(Value::Null, false), Shape::Absent));
/// assert!(matches!(Shape::of(Value::from(0), true), Shape::Absent));
/// assert!(matches!(Shape::of(Value::from(0), false), Shape::Single(_)));
/// assert!(matches!(Shape::of(Value::from(traversable![1]), false), Shape::Ordered(_)));
///
/// let collection = Collection::new(traversable![1, 2]).into_value();
/// assert!(matches!(Shape::of(collection, false), Shape::Iterable { .. }));
/// ```
#[derive(Debug, Clone)]
pub enum Shape {
    /// An array.
    Ordered(Traversable),
    /// An object exposing iteration, together with a snapshot of its entries.
    Iterable {
        /// The object itself.
        object: Arc<dyn Object>,
        /// The entries it yielded.
        entries: Traversable,
    },
    /// `Null`, or an empty value when collapsing.
    Absent,
    /// Any other value, to be wrapped into a one-element list.
    Single(Value),
}

impl Shape {
    /// Classifies `value`.
    ///
    /// With `collapse_empty`, every value that
    /// [`is_empty`](Value::is_empty) is [`Shape::Absent`].
    pub fn of(value: Value, collapse_empty: bool) -> Self {
        if collapse_empty && value.is_empty() {
            return Self::Absent;
        }
        match value {
            Value::Null => Self::Absent,
            Value::Array(traversable) => Self::Ordered(traversable),
            Value::Object(object) => match object.iterate() {
                Some(entries) => Self::Iterable { object, entries },
                None => Self::Single(Value::Object(object)),
            },
            other => Self::Single(other),
        }
    }
}

/// Converts any value into a [`Traversable`].
///
/// Arrays are returned as they are (storage shared), iterable objects are
/// snapshotted with their keys, `Null` becomes the empty traversable, and any
/// other value is wrapped into a one-element list. With `collapse_empty`,
/// empty values (`false`, `0`, `0.0`, `""`, `"0"`) also become the empty
/// traversable.
///
/// The conversion is idempotent.
///
/// # Arguments
///
/// * `value` - The value to convert
/// * `collapse_empty` - Whether empty values become the empty traversable
///
/// # Examples
///
/// ```rust
/// use traverso::convert::to_array;
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// assert_eq!(to_array(Value::Null, false), traversable![]);
/// assert_eq!(to_array(0, false), traversable![0]);
/// assert_eq!(to_array(0, true), traversable![]);
/// assert_eq!(to_array(traversable!["a" => 1], true), traversable!["a" => 1]);
/// ```
pub fn to_array(value: impl Into<Value>, collapse_empty: bool) -> Traversable {
    match Shape::of(value.into(), collapse_empty) {
        Shape::Ordered(traversable) => traversable,
        Shape::Iterable { entries, .. } => entries,
        Shape::Absent => Traversable::new(),
        Shape::Single(value) => Traversable::from_values([value]),
    }
}

/// Converts any value into something array-like.
///
/// Behaves like [`to_array`], except that an iterable object is returned
/// unchanged instead of being snapshotted.
///
/// # Examples
///
/// ```rust
/// use traverso::convert::to_array_like;
/// use traverso::traversable;
/// use traverso::value::{Collection, Value};
///
/// let collection = Collection::new(traversable![1, 2]).into_value();
/// assert_eq!(to_array_like(collection.clone(), false), collection);
/// assert_eq!(to_array_like("abc", false), Value::from(traversable!["abc"]));
/// assert_eq!(to_array_like("", true), Value::from(traversable![]));
/// ```
pub fn to_array_like(value: impl Into<Value>, collapse_empty: bool) -> Value {
    match Shape::of(value.into(), collapse_empty) {
        Shape::Ordered(traversable) => Value::Array(traversable),
        Shape::Iterable { object, .. } => Value::Object(object),
        Shape::Absent => Value::Array(Traversable::new()),
        Shape::Single(value) => Value::Array(Traversable::from_values([value])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversable;
    use crate::value::{Collection, Function, Record};
    use rstest::rstest;

    #[rstest]
    #[case(Value::from(traversable![]), false, traversable![])]
    #[case(Value::from(traversable![1, 2, 3]), true, traversable![1, 2, 3])]
    #[case(Value::from(traversable!["foo" => 1, "bar" => 2]), false, traversable!["foo" => 1, "bar" => 2])]
    #[case(Value::from(0), false, traversable![0])]
    #[case(Value::from(0), true, traversable![])]
    #[case(Value::from(1), true, traversable![1])]
    #[case(Value::from(i64::MIN), false, traversable![i64::MIN])]
    #[case(Value::from(0.0), true, traversable![])]
    #[case(Value::from(f64::INFINITY), true, traversable![f64::INFINITY])]
    #[case(Value::from(false), false, traversable![false])]
    #[case(Value::from(false), true, traversable![])]
    #[case(Value::from(true), true, traversable![true])]
    #[case(Value::from(""), false, traversable![""])]
    #[case(Value::from(""), true, traversable![])]
    #[case(Value::from("0"), true, traversable![])]
    #[case(Value::from("abc"), true, traversable!["abc"])]
    #[case(Value::Null, false, traversable![])]
    #[case(Value::Null, true, traversable![])]
    fn to_array_cases(#[case] value: Value, #[case] collapse_empty: bool, #[case] expected: Traversable) {
        assert_eq!(to_array(value, collapse_empty), expected);
    }

    #[rstest]
    fn arrays_share_storage() {
        let original = traversable![1, 2, 3];
        assert!(to_array(original.clone(), false).ptr_eq(&original));
    }

    #[rstest]
    fn iterable_objects_are_snapshotted_with_keys() {
        let collection = Collection::new(traversable!["foo" => 1, "bar" => 2]).into_value();
        assert_eq!(to_array(collection, false), traversable!["foo" => 1, "bar" => 2]);

        let empty = Collection::new(traversable![]).into_value();
        assert_eq!(to_array(empty, true), traversable![]);
    }

    #[rstest]
    fn non_iterable_objects_and_functions_are_wrapped() {
        let record = Record::new("Point").with_property("x", 1).into_value();
        assert_eq!(to_array(record.clone(), true), traversable![record]);

        let function = Value::from(Function::unary(|value| value));
        assert_eq!(to_array(function.clone(), false), traversable![function]);
    }

    #[rstest]
    fn to_array_like_keeps_iterable_objects() {
        let collection = Collection::new(traversable![1]).into_value();
        assert!(matches!(to_array_like(collection, false), Value::Object(_)));
        let record = Record::new("Row").into_value();
        assert!(matches!(to_array_like(record, false), Value::Array(_)));
        assert_eq!(to_array_like(Value::Null, false), Value::from(traversable![]));
    }
}

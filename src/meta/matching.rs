//! Quantifiers and capability predicates.

use crate::convert::to_array;
use crate::value::Value;

/// Returns `true` if every value of the normalized input satisfies
/// `predicate`. Vacuously `true` for an empty input.
///
/// Evaluation stops at the first value that fails.
///
/// # Examples
///
/// ```rust
/// use traverso::meta::all_match;
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// assert!(all_match(Value::is_truthy, traversable![1, "a", true]));
/// assert!(!all_match(Value::is_truthy, traversable![1, 0]));
/// assert!(all_match(Value::is_truthy, Value::Null));
/// ```
pub fn all_match<F>(mut predicate: F, input: impl Into<Value>) -> bool
where
    F: FnMut(&Value) -> bool,
{
    to_array(input, false).values().all(|value| predicate(value))
}

/// Returns `true` if at least one value of the normalized input satisfies
/// `predicate`. `false` for an empty input.
///
/// # Examples
///
/// ```rust
/// use traverso::meta::any_match;
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// assert!(any_match(Value::is_null, traversable![1, Value::Null]));
/// assert!(!any_match(Value::is_null, traversable![]));
/// ```
pub fn any_match<F>(mut predicate: F, input: impl Into<Value>) -> bool
where
    F: FnMut(&Value) -> bool,
{
    to_array(input, false).values().any(|value| predicate(value))
}

/// Returns `true` if no value of the normalized input satisfies
/// `predicate`. Vacuously `true` for an empty input.
pub fn none_match<F>(mut predicate: F, input: impl Into<Value>) -> bool
where
    F: FnMut(&Value) -> bool,
{
    !to_array(input, false).values().any(|value| predicate(value))
}

/// Returns `true` for arrays and objects exposing iteration.
pub fn is_traversable(value: &Value) -> bool {
    value.is_traversable()
}

/// Returns `true` for arrays and for objects that are both iterable and
/// addressable by key.
///
/// # Examples
///
/// ```rust
/// use traverso::meta::is_like_array;
/// use traverso::traversable;
/// use traverso::value::{Collection, Record, Value};
///
/// assert!(is_like_array(&Value::from(traversable![])));
/// assert!(is_like_array(&Collection::new(traversable![1]).into_value()));
/// assert!(!is_like_array(&Record::new("Row").iterable().into_value()));
/// assert!(!is_like_array(&Value::from("abc")));
/// ```
pub fn is_like_array(value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(object) => object.supports_keys() && object.iterate().is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversable;
    use crate::value::{Collection, Record};
    use rstest::rstest;

    fn positive(value: &Value) -> bool {
        value.as_i64().is_some_and(|number| number > 0)
    }

    #[rstest]
    #[case(traversable![], true, false, true)]
    #[case(traversable![1, 2], true, true, false)]
    #[case(traversable![1, -2], false, true, false)]
    #[case(traversable![-1, -2], false, false, true)]
    fn quantifiers(
        #[case] input: crate::value::Traversable,
        #[case] all: bool,
        #[case] any: bool,
        #[case] none: bool,
    ) {
        assert_eq!(all_match(positive, input.clone()), all);
        assert_eq!(any_match(positive, input.clone()), any);
        assert_eq!(none_match(positive, input), none);
    }

    #[rstest]
    fn all_match_short_circuits() {
        let mut calls = 0;
        let result = all_match(
            |value| {
                calls += 1;
                positive(value)
            },
            traversable![1, -1, 2, 3],
        );
        assert!(!result);
        assert_eq!(calls, 2);
    }

    #[rstest]
    fn quantifiers_normalize_scalars() {
        assert!(all_match(positive, 5));
        assert!(none_match(positive, Value::Null));
    }

    #[rstest]
    fn traversable_capability() {
        assert!(is_traversable(&Value::from(traversable![])));
        assert!(is_traversable(&Collection::new(traversable![]).into_value()));
        assert!(is_traversable(&Record::new("Row").iterable().into_value()));
        assert!(!is_traversable(&Record::new("Row").into_value()));
        assert!(!is_traversable(&Value::from(1)));
    }
}

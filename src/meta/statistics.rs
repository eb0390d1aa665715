//! Descriptive statistics of a collection.

use std::cmp::Ordering;

use crate::convert::traversable_sort_by;
use crate::value::{SortFlags, Value};

/// An immutable snapshot of descriptive statistics.
///
/// Values are sorted ascending (stable, by [`SortFlags`] or a comparator),
/// then read as floats. An empty input gives a count of `0`, every numeric
/// field `0.0`, and an even count.
///
/// # Examples
///
/// ```rust
/// use traverso::meta::Statistics;
/// use traverso::traversable;
///
/// let statistics = Statistics::new(traversable![4, 1, 3, 2]);
/// assert_eq!(statistics.count(), 4);
/// assert_eq!(statistics.min(), 1.0);
/// assert_eq!(statistics.max(), 4.0);
/// assert_eq!(statistics.sum(), 10.0);
/// assert_eq!(statistics.average(), 2.5);
/// assert_eq!(statistics.median_floor(), 2.0);
/// assert_eq!(statistics.median_ceil(), 3.0);
/// assert_eq!(statistics.median_average(), 2.5);
/// assert!(statistics.count_is_even());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Statistics {
    count: usize,
    min: f64,
    max: f64,
    sum: f64,
    average: f64,
    median_floor: f64,
    median_ceil: f64,
    median_average: f64,
    count_is_even: bool,
    count_is_odd: bool,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            count: 0,
            min: 0.0,
            max: 0.0,
            sum: 0.0,
            average: 0.0,
            median_floor: 0.0,
            median_ceil: 0.0,
            median_average: 0.0,
            count_is_even: true,
            count_is_odd: false,
        }
    }
}

impl Statistics {
    /// Computes statistics under the loose natural ordering.
    pub fn new(input: impl Into<Value>) -> Self {
        Self::with_flags(input, SortFlags::Regular)
    }

    /// Computes statistics, sorting with the given mode.
    pub fn with_flags(input: impl Into<Value>, flags: SortFlags) -> Self {
        Self::by(input, |left, right| flags.compare(left, right))
    }

    /// Computes statistics, sorting with a caller comparator.
    pub fn by<F>(input: impl Into<Value>, comparator: F) -> Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let sorted: Vec<f64> = traversable_sort_by(comparator, input)
            .values()
            .map(Value::to_f64)
            .collect();
        Self::from_sorted(&sorted)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_sorted(sorted: &[f64]) -> Self {
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Self::default();
        };
        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        let count_is_odd = count % 2 == 1;
        let middle = count / 2;
        let (median_floor, median_ceil) = if count_is_odd {
            (sorted[middle], sorted[middle])
        } else {
            (sorted[middle - 1], sorted[middle])
        };
        let median_average = if count_is_odd {
            median_floor
        } else {
            (median_floor + median_ceil) / 2.0
        };
        Self {
            count,
            min,
            max,
            sum,
            average: sum / count as f64,
            median_floor,
            median_ceil,
            median_average,
            count_is_even: !count_is_odd,
            count_is_odd,
        }
    }

    /// Number of values.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Smallest value.
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest value.
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Sum of the values.
    pub const fn sum(&self) -> f64 {
        self.sum
    }

    /// Arithmetic mean.
    pub const fn average(&self) -> f64 {
        self.average
    }

    /// Lower median: the middle value, or the lower of the two middle values.
    pub const fn median_floor(&self) -> f64 {
        self.median_floor
    }

    /// Upper median: the middle value, or the upper of the two middle values.
    pub const fn median_ceil(&self) -> f64 {
        self.median_ceil
    }

    /// Mean of [`median_floor`](Self::median_floor) and
    /// [`median_ceil`](Self::median_ceil).
    pub const fn median_average(&self) -> f64 {
        self.median_average
    }

    /// Whether the count is even (including zero).
    pub const fn count_is_even(&self) -> bool {
        self.count_is_even
    }

    /// Whether the count is odd.
    pub const fn count_is_odd(&self) -> bool {
        self.count_is_odd
    }
}

/// Shorthand for [`Statistics::with_flags`].
pub fn statistics(input: impl Into<Value>, flags: SortFlags) -> Statistics {
    Statistics::with_flags(input, flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversable;
    use rstest::rstest;

    #[rstest]
    fn empty_input_is_all_zero() {
        let statistics = Statistics::new(Value::Null);
        assert_eq!(statistics, Statistics::default());
        assert_eq!(statistics.count(), 0);
        assert!(statistics.count_is_even());
        assert!(!statistics.count_is_odd());
    }

    #[rstest]
    fn single_value() {
        let statistics = Statistics::new(traversable![5]);
        assert_eq!(statistics.count(), 1);
        assert_eq!(statistics.min(), 5.0);
        assert_eq!(statistics.max(), 5.0);
        assert_eq!(statistics.sum(), 5.0);
        assert_eq!(statistics.average(), 5.0);
        assert_eq!(statistics.median_floor(), 5.0);
        assert_eq!(statistics.median_ceil(), 5.0);
        assert_eq!(statistics.median_average(), 5.0);
        assert!(statistics.count_is_odd());
    }

    #[rstest]
    fn odd_count_uses_the_middle_value() {
        let statistics = Statistics::new(traversable![9, 1, 5]);
        assert_eq!(statistics.median_floor(), 5.0);
        assert_eq!(statistics.median_ceil(), 5.0);
        assert_eq!(statistics.median_average(), 5.0);
    }

    #[rstest]
    fn numeric_strings_are_read_as_numbers() {
        let statistics = Statistics::new(traversable!["10", "9", "1.5"]);
        assert_eq!(statistics.min(), 1.5);
        assert_eq!(statistics.max(), 10.0);
    }

    #[rstest]
    fn string_mode_changes_the_order() {
        let statistics = Statistics::with_flags(traversable!["10", "9"], SortFlags::String);
        assert_eq!(statistics.min(), 10.0);
        assert_eq!(statistics.max(), 9.0);
    }

    #[rstest]
    fn comparator_defines_the_order() {
        let statistics = Statistics::by(traversable![1, 2, 3], |left, right| {
            SortFlags::Regular.compare(right, left)
        });
        assert_eq!(statistics.min(), 3.0);
        assert_eq!(statistics.max(), 1.0);
        assert_eq!(statistics.median_average(), 2.0);
    }

    #[rstest]
    #[case(SortFlags::Regular)]
    #[case(SortFlags::Numeric)]
    fn mixed_values_with_nan_still_count_every_value(#[case] flags: SortFlags) {
        let pool = [
            Value::Int(4),
            Value::Float(f64::NAN),
            Value::Bool(true),
            Value::from("a"),
            Value::Null,
            Value::Int(-2),
            Value::from("10"),
        ];
        let input: crate::value::Traversable =
            (0..40).map(|index| pool[(index * 3 + index / 5) % pool.len()].clone()).collect();
        let statistics = Statistics::with_flags(input, flags);
        assert_eq!(statistics.count(), 40);
        assert!(statistics.count_is_even());
    }
}

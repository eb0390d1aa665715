//! Ordering of dynamic values.
//!
//! [`compare_regular`] is the "natural ordering" used whenever no comparator
//! is supplied (default sorting, `find_min`/`find_max`, `distinct`). It
//! mixes types the way a loosely-typed language does:
//!
//! - booleans, and `Null` against anything but a string, compare by truthiness
//! - numbers compare numerically, also against numeric strings
//! - two numeric strings compare numerically, other strings byte-wise
//! - arrays compare by length first, then value by value under the left keys
//! - arrays, objects and functions sort after scalars

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use super::dynamic::parse_numeric;
use super::{Number, Value};

/// Built-in ordering modes for sorting and deduplication.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use traverso::value::{SortFlags, Value};
///
/// let ten = Value::from("10");
/// let nine = Value::from("9");
/// assert_eq!(SortFlags::Regular.compare(&ten, &nine), Ordering::Greater);
/// assert_eq!(SortFlags::String.compare(&ten, &nine), Ordering::Less);
///
/// let file10 = Value::from("file10");
/// let file9 = Value::from("file9");
/// assert_eq!(SortFlags::Natural.compare(&file10, &file9), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortFlags {
    /// Loose natural ordering, see [`compare_regular`].
    #[default]
    Regular,
    /// Compare numeric readings of the values.
    Numeric,
    /// Compare string forms byte-wise.
    String,
    /// Compare lower-cased string forms.
    StringCaseInsensitive,
    /// Compare string forms with digit runs read as numbers.
    Natural,
    /// [`Natural`](Self::Natural) on lower-cased string forms.
    NaturalCaseInsensitive,
}

impl SortFlags {
    /// Compares two values under this mode.
    pub fn compare(self, left: &Value, right: &Value) -> Ordering {
        match self {
            Self::Regular => compare_regular(left, right),
            Self::Numeric => compare_numbers(Some(numeric_reading(left)), Some(numeric_reading(right))),
            Self::String => left.to_string().cmp(&right.to_string()),
            Self::StringCaseInsensitive => left
                .to_string()
                .to_lowercase()
                .cmp(&right.to_string().to_lowercase()),
            Self::Natural => natural_compare(&left.to_string(), &right.to_string()),
            Self::NaturalCaseInsensitive => natural_compare(
                &left.to_string().to_lowercase(),
                &right.to_string().to_lowercase(),
            ),
        }
    }
}

/// Compares two values under the loose natural ordering.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use traverso::value::{compare_regular, Value};
///
/// assert_eq!(compare_regular(&Value::from(2), &Value::from(10)), Ordering::Less);
/// assert_eq!(compare_regular(&Value::from("2"), &Value::from(2.0)), Ordering::Equal);
/// assert_eq!(compare_regular(&Value::from("abc"), &Value::from("abd")), Ordering::Less);
/// assert_eq!(compare_regular(&Value::Null, &Value::from(false)), Ordering::Equal);
/// ```
pub fn compare_regular(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(_), _) | (_, Value::Bool(_)) => left.is_truthy().cmp(&right.is_truthy()),
        (Value::Null, Value::Str(text)) => compare_strings("", text),
        (Value::Str(text), Value::Null) => compare_strings(text, ""),
        (Value::Null, _) | (_, Value::Null) => left.is_truthy().cmp(&right.is_truthy()),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            compare_numbers(left.to_number(), right.to_number())
        }
        (Value::Int(_) | Value::Float(_), Value::Str(text)) => match parse_numeric(text) {
            Some(number) => compare_numbers(left.to_number(), Some(number)),
            None => left.to_string().as_str().cmp(text.as_str()),
        },
        (Value::Str(text), Value::Int(_) | Value::Float(_)) => match parse_numeric(text) {
            Some(number) => compare_numbers(Some(number), right.to_number()),
            None => text.as_str().cmp(right.to_string().as_str()),
        },
        (Value::Str(left_text), Value::Str(right_text)) => compare_strings(left_text, right_text),
        (Value::Array(left_entries), Value::Array(right_entries)) => left_entries
            .len()
            .cmp(&right_entries.len())
            .then_with(|| {
                for (key, value) in left_entries.iter() {
                    let ordering = right_entries
                        .get(key)
                        .map_or(Ordering::Greater, |other| compare_regular(value, other));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            }),
        (Value::Array(_), _) => Ordering::Greater,
        (_, Value::Array(_)) => Ordering::Less,
        (Value::Object(left_object), Value::Object(right_object)) => {
            left_object.class_name().cmp(right_object.class_name())
        }
        (Value::Object(_), _) => Ordering::Greater,
        (_, Value::Object(_)) => Ordering::Less,
        (Value::Function(_), Value::Function(_)) => Ordering::Equal,
        (Value::Function(_), _) => Ordering::Greater,
        (_, Value::Function(_)) => Ordering::Less,
    }
}

/// Returns `true` if the values are equal under [`compare_regular`].
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    compare_regular(left, right) == Ordering::Equal
}

fn compare_numbers(left: Option<Number>, right: Option<Number>) -> Ordering {
    match (left, right) {
        (Some(Number::Int(left)), Some(Number::Int(right))) => left.cmp(&right),
        (Some(left), Some(right)) => left
            .as_f64()
            .partial_cmp(&right.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn numeric_reading(value: &Value) -> Number {
    value.to_number().unwrap_or_else(|| Number::Float(value.to_f64()))
}

fn compare_strings(left: &str, right: &str) -> Ordering {
    match (parse_numeric(left), parse_numeric(right)) {
        (Some(left_number), Some(right_number)) => {
            compare_numbers(Some(left_number), Some(right_number))
        }
        _ => left.cmp(right),
    }
}

fn take_digits(characters: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(character) = characters.next_if(char::is_ascii_digit) {
        run.push(character);
    }
    run
}

fn natural_compare(left: &str, right: &str) -> Ordering {
    let mut left_characters = left.chars().peekable();
    let mut right_characters = right.chars().peekable();
    loop {
        match (left_characters.peek().copied(), right_characters.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(left_character), Some(right_character))
                if left_character.is_ascii_digit() && right_character.is_ascii_digit() =>
            {
                let left_run = take_digits(&mut left_characters);
                let right_run = take_digits(&mut right_characters);
                let left_run = left_run.trim_start_matches('0');
                let right_run = right_run.trim_start_matches('0');
                let ordering = left_run
                    .len()
                    .cmp(&right_run.len())
                    .then_with(|| left_run.cmp(right_run));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(left_character), Some(right_character)) => {
                if left_character != right_character {
                    return left_character.cmp(&right_character);
                }
                left_characters.next();
                right_characters.next();
            }
        }
    }
}

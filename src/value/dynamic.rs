//! The dynamic value type.

use std::fmt;
use std::sync::Arc;

use super::{Function, Key, Object, Traversable};
use crate::Error;

/// A dynamically-typed value.
///
/// [`Value::Null`] is the absence sentinel used by
/// [`Optional`](crate::monad::Optional) and [`Chain`](crate::monad::Chain).
///
/// # Examples
///
/// ```rust
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// let values = [
///     Value::Null,
///     Value::from(false),
///     Value::from(0),
///     Value::from(""),
///     Value::from("0"),
///     Value::from(traversable![]),
/// ];
/// assert!(values.iter().all(Value::is_empty));
///
/// assert!(!Value::from("abc").is_empty());
/// assert_eq!(Value::from(3.0).to_string(), "3");
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered key→value collection.
    Array(Traversable),
    /// An object exposing [`Object`] capabilities.
    Object(Arc<dyn Object>),
    /// A callable.
    Function(Function),
}

static_assertions::assert_impl_all!(Value: Send, Sync);

/// A number extracted from a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
}

impl Number {
    /// Returns the number as a float.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(integer) => integer as f64,
            Self::Float(float) => float,
        }
    }

    /// Adds two numbers, staying integral until an operand is a float or the
    /// integer addition overflows.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_add(right)
                .map_or_else(|| Self::Float(self.as_f64() + other.as_f64()), Self::Int),
            _ => Self::Float(self.as_f64() + other.as_f64()),
        }
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(integer) => Self::Int(integer),
            Number::Float(float) => Self::Float(float),
        }
    }
}

/// Parses a numeric string: optional surrounding whitespace, an optional
/// sign, decimal digits with an optional fraction and exponent.
pub(crate) fn parse_numeric(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(position) => (&body[..position], Some(&body[position + 1..])),
        None => (body, None),
    };
    let (whole, fraction) = match mantissa.find('.') {
        Some(position) => (&mantissa[..position], Some(&mantissa[position + 1..])),
        None => (mantissa, None),
    };
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    let mantissa_valid = all_digits(whole)
        && fraction.is_none_or(all_digits)
        && (!whole.is_empty() || fraction.is_some_and(|digits| !digits.is_empty()));
    let exponent_valid = exponent.is_none_or(|digits| {
        let digits = digits.strip_prefix(['+', '-']).unwrap_or(digits);
        !digits.is_empty() && all_digits(digits)
    });
    if !mantissa_valid || !exponent_valid {
        return None;
    }
    if fraction.is_none() && exponent.is_none() {
        if let Ok(integer) = trimmed.parse::<i64>() {
            return Some(Number::Int(integer));
        }
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

impl Value {
    /// Wraps an [`Object`] implementation.
    pub fn object(object: impl Object + 'static) -> Self {
        Self::Object(Arc::new(object))
    }

    /// Returns `true` for the absence sentinel.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value counts as empty: `Null`, `false`, `0`,
    /// `0.0`, `""`, `"0"` and empty arrays. Objects and functions are never
    /// empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(boolean) => !boolean,
            Self::Int(integer) => *integer == 0,
            Self::Float(float) => *float == 0.0,
            Self::Str(text) => text.is_empty() || text == "0",
            Self::Array(traversable) => traversable.is_empty(),
            Self::Object(_) | Self::Function(_) => false,
        }
    }

    /// Returns `true` unless the value [`is_empty`](Self::is_empty).
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_empty()
    }

    /// Returns `true` for arrays and iterable objects.
    pub fn is_traversable(&self) -> bool {
        match self {
            Self::Array(_) => true,
            Self::Object(object) => object.iterate().is_some(),
            _ => false,
        }
    }

    /// Returns `true` if the value can be [`call`](Self::call)ed: a function,
    /// or a two-element list `[object, "method"]` naming an existing method.
    pub fn is_callable(&self) -> bool {
        match self {
            Self::Function(_) => true,
            Self::Array(traversable) => bound_method(traversable).is_some(),
            _ => false,
        }
    }

    /// Calls the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the value is not callable, or the
    /// error produced by the callee.
    pub fn call(&self, arguments: &[Self]) -> Result<Self, Error> {
        match self {
            Self::Function(function) => function.call(arguments),
            Self::Array(traversable) => match bound_method(traversable) {
                Some((object, method)) => object.call_method(method, arguments),
                None => Err(not_callable(self)),
            },
            _ => Err(not_callable(self)),
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the number, if this is an `Int` or a `Float`.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(integer) => Some(*integer as f64),
            Self::Float(float) => Some(*float),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the traversable, if this is an `Array`.
    pub const fn as_traversable(&self) -> Option<&Traversable> {
        match self {
            Self::Array(traversable) => Some(traversable),
            _ => None,
        }
    }

    /// Returns the object, if this is an `Object`.
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Self::Object(object) => Some(object.as_ref()),
            _ => None,
        }
    }

    /// Returns the function, if this is a `Function`.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the numeric reading of the value: numbers as they are,
    /// booleans as `0`/`1`, numeric strings parsed; `None` otherwise.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Self::Int(integer) => Some(Number::Int(*integer)),
            Self::Float(float) => Some(Number::Float(*float)),
            Self::Bool(boolean) => Some(Number::Int(i64::from(*boolean))),
            Self::Str(text) => parse_numeric(text),
            _ => None,
        }
    }

    /// Converts the value to a float: non-numeric values read as `0.0`,
    /// except non-empty arrays and objects which read as `1.0`.
    pub fn to_f64(&self) -> f64 {
        self.to_number().map_or_else(
            || match self {
                Self::Array(traversable) if !traversable.is_empty() => 1.0,
                Self::Object(_) | Self::Function(_) => 1.0,
                _ => 0.0,
            },
            Number::as_f64,
        )
    }

    /// Converts the value to a key, if it is an integer or a string.
    pub fn to_key(&self) -> Option<Key> {
        match self {
            Self::Int(integer) => Some(Key::Index(*integer)),
            Self::Str(text) => Some(Key::from(text.as_str())),
            _ => None,
        }
    }

    /// Returns a short name for the type of the value.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Object(object) => object.class_name(),
            Self::Function(_) => "function",
        }
    }
}

fn bound_method(traversable: &Traversable) -> Option<(&dyn Object, &str)> {
    if traversable.len() != 2 || !traversable.is_list() {
        return None;
    }
    let object = traversable.get(&Key::Index(0))?.as_object()?;
    let method = traversable.get(&Key::Index(1))?.as_str()?;
    object.has_method(method).then_some((object, method))
}

fn not_callable(value: &Value) -> Error {
    Error::invalid_argument(format!("value of type {} is not callable", value.type_name()))
}

fn format_float(float: f64) -> String {
    if float.is_nan() {
        "NAN".to_string()
    } else if float.is_infinite() {
        let text = if float.is_sign_positive() { "INF" } else { "-INF" };
        text.to_string()
    } else {
        float.to_string()
    }
}

impl fmt::Display for Value {
    /// Renders the string form of the value: `Null` and `false` as `""`,
    /// `true` as `"1"`, arrays as `"Array"`, objects as their class name.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Bool(false) => Ok(()),
            Self::Bool(true) => formatter.write_str("1"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => formatter.write_str(&format_float(*float)),
            Self::Str(text) => formatter.write_str(text),
            Self::Array(_) => formatter.write_str("Array"),
            Self::Object(object) => formatter.write_str(object.class_name()),
            Self::Function(_) => formatter.write_str("Function"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("Null"),
            Self::Bool(boolean) => write!(formatter, "{boolean:?}"),
            Self::Int(integer) => write!(formatter, "{integer:?}"),
            Self::Float(float) => write!(formatter, "{float:?}"),
            Self::Str(text) => write!(formatter, "{text:?}"),
            Self::Array(traversable) => write!(formatter, "{traversable:?}"),
            Self::Object(object) => write!(formatter, "{object:?}"),
            Self::Function(function) => write!(formatter, "{function:?}"),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality; objects compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => Arc::ptr_eq(left, right),
            (Self::Function(left), Self::Function(right)) => left == right,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Bool(boolean)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<u32> for Value {
    fn from(integer: u32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(integer: usize) -> Self {
        i64::try_from(integer).map_or(Self::Float(integer as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Index(index) => Self::Int(index),
            Key::Name(name) => Self::Str(name),
        }
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Self {
        Self::from(key.clone())
    }
}

impl From<Traversable> for Value {
    fn from(traversable: Traversable) -> Self {
        Self::Array(traversable)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Arc<dyn Object>> for Value {
    fn from(object: Arc<dyn Object>) -> Self {
        Self::Object(object)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(Traversable::from_values(values))
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Self::Array(Traversable::from_values(values))
    }
}

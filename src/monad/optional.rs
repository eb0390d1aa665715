//! The absence-safe `Optional` monad.

use std::fmt;
use std::sync::{Arc, LazyLock};

use super::{Chain, Monad, Stream};
use crate::value::Value;

static EMPTY_OPTIONAL: LazyLock<Optional> = LazyLock::new(|| Optional {
    value: Arc::new(Value::Null),
});

/// A value that may be absent.
///
/// An `Optional` is present when it holds anything but [`Value::Null`].
/// Every absent `Optional` is the same canonical instance, observable
/// through [`is_same`](Self::is_same).
///
/// # Examples
///
/// ```rust
/// use traverso::monad::Optional;
/// use traverso::value::Value;
///
/// let name = Optional::of("Ada").if_present(|value| Value::from(format!("Hello, {value}")));
/// assert_eq!(name.or_else("nobody"), Value::from("Hello, Ada"));
///
/// let missing = Optional::of(Value::Null).if_present(|_| unreachable!());
/// assert!(missing.is_absent());
/// assert!(missing.is_same(&Optional::empty()));
/// ```
#[derive(Clone)]
pub struct Optional {
    value: Arc<Value>,
}

impl Optional {
    /// Wraps `value`, redirecting `Null` to the canonical absent instance.
    #[inline]
    pub fn of(value: impl Into<Value>) -> Self {
        Self::create(value.into())
    }

    /// Returns the canonical absent instance.
    pub fn empty() -> Self {
        EMPTY_OPTIONAL.clone()
    }

    /// Returns `true` if a value is present.
    #[inline]
    pub fn is_present(&self) -> bool {
        !self.value.is_null()
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.value.is_null()
    }

    /// Returns `true` if both optionals are the same instance.
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }

    /// Maps the value if present; an absent optional is returned as is.
    ///
    /// The mapper returning `Null` yields the absent optional.
    #[must_use]
    pub fn if_present<F>(self, mapper: F) -> Self
    where
        F: FnOnce(Value) -> Value,
    {
        if self.is_present() { self.map(mapper) } else { self }
    }

    /// Keeps the value only if it satisfies `predicate`.
    ///
    /// The predicate is not called on an absent optional.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use traverso::monad::Optional;
    /// use traverso::value::Value;
    ///
    /// assert!(Optional::of(4).filter(|value| value.as_i64() == Some(4)).is_present());
    /// assert!(Optional::of(5).filter(|value| value.as_i64() == Some(4)).is_absent());
    /// ```
    #[must_use]
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: FnOnce(&Value) -> bool,
    {
        if self.is_absent() || predicate(self.value.as_ref()) {
            self
        } else {
            Self::empty()
        }
    }

    /// Returns the value, or `default` when absent.
    pub fn or_else(self, default: impl Into<Value>) -> Value {
        if self.is_present() { self.extract() } else { default.into() }
    }

    /// Returns the value, or the result of `supplier` when absent.
    pub fn or_else_get<F>(self, supplier: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        if self.is_present() { self.extract() } else { supplier() }
    }

    /// Returns the value, or the error built by `factory` when absent.
    ///
    /// # Errors
    ///
    /// Returns `factory()` unchanged when the optional is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use traverso::monad::Optional;
    /// use traverso::value::Value;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct NotFound;
    ///
    /// assert_eq!(Optional::of(1).or_else_throw(|| NotFound), Ok(Value::Int(1)));
    /// assert_eq!(Optional::empty().or_else_throw(|| NotFound), Err(NotFound));
    /// ```
    pub fn or_else_throw<E, F>(self, factory: F) -> Result<Value, E>
    where
        F: FnOnce() -> E,
    {
        if self.is_present() { Ok(self.extract()) } else { Err(factory()) }
    }

    /// Moves the value into a [`Stream`]; an absent optional gives the
    /// empty stream.
    pub fn stream(self) -> Stream {
        self.flat_map(Stream::create)
    }

    /// Moves the value into a [`Chain`]; an absent optional gives the empty
    /// chain.
    pub fn chain(self) -> Chain {
        self.flat_map(Chain::create)
    }

    /// Converts into an [`Option`].
    pub fn into_option(self) -> Option<Value> {
        if self.is_present() { Some(self.extract()) } else { None }
    }
}

impl Monad for Optional {
    type Inner = Value;

    fn create(value: Value) -> Self {
        if value.is_null() {
            Self::empty()
        } else {
            Self {
                value: Arc::new(value),
            }
        }
    }

    #[inline]
    fn get(&self) -> &Value {
        &self.value
    }

    fn extract(self) -> Value {
        Arc::unwrap_or_clone(self.value)
    }
}

impl Default for Optional {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Optional {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other) || self.value == other.value
    }
}

impl fmt::Debug for Optional {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            formatter.debug_tuple("Optional").field(&self.value).finish()
        } else {
            formatter.write_str("Optional::Absent")
        }
    }
}

impl fmt::Display for Optional {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Optional {
    fn from(option: Option<T>) -> Self {
        option.map_or_else(Self::empty, Self::of)
    }
}

impl From<Optional> for Option<Value> {
    fn from(optional: Optional) -> Self {
        optional.into_option()
    }
}

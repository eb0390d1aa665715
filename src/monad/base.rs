//! The monad abstraction shared by every wrapper of this module.
//!
//! A monad owns exactly one immutable value, fixed at construction by the
//! type's own preprocessing ([`Monad::create`]). Transformations never
//! modify a monad; they build a new one.
//!
//! # Laws
//!
//! For every concrete monad `M`, value `a`, and mappers `f`, `g` returning
//! monads:
//!
//! ## Left Identity
//!
//! ```text
//! M::create(a).flat_map(f) == f(a')
//! ```
//!
//! where `a'` is `a` after `M`'s preprocessing.
//!
//! ## Right Identity
//!
//! ```text
//! m.flat_map(M::create) == m
//! ```
//!
//! ## Associativity
//!
//! ```text
//! m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
//! ```

use std::fmt;

use crate::value::Value;

/// A wrapper around one value with value-level construction and chaining.
///
/// # Required Methods
///
/// - `create`: build an instance from a dynamic value, applying the type's
///   preprocessing (normalization, singleton redirection)
/// - `get`: borrow the wrapped value
/// - `extract`: take the wrapped value out
///
/// # Provided Methods
///
/// - `map`: apply a mapper and rebuild the same monad type with
///   [`create`](Monad::create)
/// - `flat_map`: hand the value to a mapper producing any other monad
///
/// # Examples
///
/// ```rust
/// use traverso::monad::{Identity, Monad, Optional};
/// use traverso::value::Value;
///
/// let doubled = Identity::of(21).map(|value| Value::Int(value.as_i64().unwrap_or(0) * 2));
/// assert_eq!(doubled.get(), &Value::Int(42));
///
/// let optional: Optional = Identity::of(Value::Null).flat_map(Optional::create);
/// assert!(optional.is_absent());
/// ```
pub trait Monad: Sized {
    /// The type of the wrapped value.
    type Inner;

    /// Builds an instance from a dynamic value.
    fn create(value: Value) -> Self;

    /// Borrows the wrapped value.
    fn get(&self) -> &Self::Inner;

    /// Consumes the monad and returns its value.
    fn extract(self) -> Self::Inner;

    /// Applies `mapper` to the value and wraps the result into the same
    /// monad type.
    fn map<F>(self, mapper: F) -> Self
    where
        F: FnOnce(Self::Inner) -> Value,
    {
        Self::create(mapper(self.extract()))
    }

    /// Applies `mapper`, which produces a monad of any type, to the value.
    fn flat_map<M, F>(self, mapper: F) -> M
    where
        M: Monad,
        F: FnOnce(Self::Inner) -> M,
    {
        mapper(self.extract())
    }
}

/// The plain monad: wraps a value without any preprocessing.
///
/// # Examples
///
/// ```rust
/// use traverso::monad::{Identity, Monad};
/// use traverso::value::Value;
///
/// let wrapped = Identity::of("text");
/// assert_eq!(wrapped.to_string(), "text");
/// assert_eq!(wrapped.extract(), Value::from("text"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Identity(Value);

impl Identity {
    /// Wraps the given value.
    #[inline]
    pub fn of(value: impl Into<Value>) -> Self {
        Self(value.into())
    }
}

impl Monad for Identity {
    type Inner = Value;

    #[inline]
    fn create(value: Value) -> Self {
        Self(value)
    }

    #[inline]
    fn get(&self) -> &Value {
        &self.0
    }

    #[inline]
    fn extract(self) -> Value {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<Value> for Identity {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

//! The safe-navigation `Chain` monad.

use std::fmt;
use std::sync::{Arc, LazyLock};

use super::{Monad, Optional};
use crate::Error;
use crate::value::{Key, Traversable, Value};

static EMPTY_CHAIN: LazyLock<Chain> = LazyLock::new(|| Chain {
    value: Arc::new(Value::Null),
});

/// A navigation path through keys, properties and calls that absorbs
/// failure.
///
/// Each step checks that the current value supports it. When it does not,
/// the step yields the canonical empty chain, and every further step on the
/// empty chain yields it again. The final value is read with
/// [`result`](Self::result).
///
/// A chain is read-only: the `set_*` and `unset_*` operations always fail.
///
/// # Examples
///
/// ```rust
/// use traverso::monad::Chain;
/// use traverso::traversable;
/// use traverso::value::{Record, Value};
///
/// let user = Record::new("User")
///     .with_property("address", traversable!["city" => "Lyon"])
///     .into_value();
///
/// let city = Chain::of(user.clone()).get_property("address").get_key("city").result();
/// assert_eq!(city.or_else("unknown"), Value::from("Lyon"));
///
/// let zip = Chain::of(user).get_property("address").get_key("zip").get_key(0).result();
/// assert!(zip.is_absent());
/// ```
#[derive(Clone)]
pub struct Chain {
    value: Arc<Value>,
}

impl Chain {
    /// Starts a chain at `value`; `Null` gives the empty chain.
    #[inline]
    pub fn of(value: impl Into<Value>) -> Self {
        Self::create(value.into())
    }

    /// Returns the canonical empty chain.
    pub fn empty() -> Self {
        EMPTY_CHAIN.clone()
    }

    /// Returns `true` for the empty chain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_null()
    }

    /// Returns `true` if both chains are the same instance.
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }

    fn collapse(&self, step: &str, target: &dyn fmt::Display) -> Self {
        if !self.is_empty() {
            tracing::trace!(step, target = %target, current = self.value.type_name(), "chain collapsed");
        }
        Self::empty()
    }

    /// Advances to the value stored under `key`.
    ///
    /// The current value must be an array, or an object supporting keyed
    /// access, and must hold a non-null value under `key`.
    #[must_use]
    pub fn get_key(&self, key: impl Into<Key>) -> Self {
        let key = key.into();
        let next = match self.value.as_ref() {
            Value::Array(traversable) => traversable.get(&key).cloned(),
            Value::Object(object) if object.supports_keys() => object.key(&key),
            _ => None,
        };
        match next {
            Some(value) if !value.is_null() => Self::create(value),
            _ => self.collapse("get_key", &key),
        }
    }

    /// Advances to the named property of the current object.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Self {
        match self.value.as_object().and_then(|object| object.property(name)) {
            Some(value) => Self::create(value),
            None => self.collapse("get_property", &name),
        }
    }

    /// Advances to the result of calling the method `name` of the current
    /// object.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the method.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use traverso::monad::Chain;
    /// use traverso::value::{Function, Record, Value};
    ///
    /// let counter = Record::new("Counter")
    ///     .with_method("next", Function::unary(|step| Value::Int(step.as_i64().unwrap_or(1) + 1)))
    ///     .into_value();
    ///
    /// let chain = Chain::of(counter.clone()).call_method("next", &[Value::Int(4)])?;
    /// assert_eq!(chain.result().or_else(0), Value::Int(5));
    ///
    /// assert!(Chain::of(counter).call_method("reset", &[])?.is_empty());
    /// # Ok::<(), traverso::Error>(())
    /// ```
    pub fn call_method(&self, name: &str, arguments: &[Value]) -> Result<Self, Error> {
        match self.value.as_object() {
            Some(object) if object.has_method(name) => {
                object.call_method(name, arguments).map(Self::create)
            }
            _ => Ok(self.collapse("call_method", &name)),
        }
    }

    /// [`call_method`](Self::call_method) with the arguments given as a
    /// traversable, passed in order.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the method.
    pub fn call_method_array(&self, name: &str, arguments: Traversable) -> Result<Self, Error> {
        self.call_method(name, &arguments.into_values())
    }

    /// Advances to the result of calling the current value.
    ///
    /// The value must be callable: a function, or an `[object, "method"]`
    /// pair naming an existing method.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the callee.
    pub fn invoke(&self, arguments: &[Value]) -> Result<Self, Error> {
        if self.value.is_callable() {
            self.value.call(arguments).map(Self::create)
        } else {
            Ok(self.collapse("invoke", &"value"))
        }
    }

    /// [`invoke`](Self::invoke) with the arguments given as a traversable.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the callee.
    pub fn invoke_array(&self, arguments: Traversable) -> Result<Self, Error> {
        self.invoke(&arguments.into_values())
    }

    /// Ends the navigation: the current value, absent for the empty chain.
    pub fn result(self) -> Optional {
        self.flat_map(Optional::create)
    }

    fn read_only(&self, operation: &str) -> Error {
        Error::illegal_operation(format!(
            "cannot {operation} through a chain over {}",
            self.value.type_name()
        ))
    }

    /// Always fails: a chain is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::IllegalOperation`].
    pub fn set_key(&self, _key: impl Into<Key>, _value: impl Into<Value>) -> Result<(), Error> {
        Err(self.read_only("set a key"))
    }

    /// Always fails: a chain is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::IllegalOperation`].
    pub fn unset_key(&self, _key: impl Into<Key>) -> Result<(), Error> {
        Err(self.read_only("unset a key"))
    }

    /// Always fails: a chain is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::IllegalOperation`].
    pub fn set_property(&self, _name: &str, _value: impl Into<Value>) -> Result<(), Error> {
        Err(self.read_only("set a property"))
    }

    /// Always fails: a chain is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::IllegalOperation`].
    pub fn unset_property(&self, _name: &str) -> Result<(), Error> {
        Err(self.read_only("unset a property"))
    }
}

impl Monad for Chain {
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

    /// Applies `mapper` unless the chain is empty.
    fn map<F>(self, mapper: F) -> Self
    where
        F: FnOnce(Value) -> Value,
    {
        if self.is_empty() {
            self
        } else {
            Self::create(mapper(self.extract()))
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other) || self.value == other.value
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            formatter.write_str("Chain::Empty")
        } else {
            formatter.debug_tuple("Chain").field(&self.value).finish()
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value)
    }
}

//! Dynamic function values.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::Error;

type Body = dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync;

/// A callable value that accepts any number of dynamic arguments.
///
/// `Function` is cheap to clone; clones share the same closure, and two
/// functions compare equal only when they share it.
///
/// # Examples
///
/// ```rust
/// use traverso::value::{Function, Value};
///
/// let add = Function::new(|arguments| {
///     let sum: i64 = arguments.iter().filter_map(Value::as_i64).sum();
///     Ok(Value::Int(sum))
/// });
/// assert_eq!(add.call(&[Value::Int(1), Value::Int(2)]), Ok(Value::Int(3)));
///
/// let double = Function::unary(|value| Value::Int(value.as_i64().unwrap_or(0) * 2));
/// assert_eq!(double.call(&[Value::Int(21)]), Ok(Value::Int(42)));
/// ```
#[derive(Clone)]
pub struct Function {
    body: Arc<Body>,
}

impl Function {
    /// Wraps a closure receiving the whole argument list.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
        }
    }

    /// Wraps an infallible closure of one argument.
    ///
    /// The first argument is passed (`Value::Null` when called without
    /// arguments); further arguments are ignored.
    pub fn unary<F>(body: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::new(move |arguments| Ok(body(arguments.first().cloned().unwrap_or_default())))
    }

    /// Wraps an infallible closure of two arguments, missing ones being `Null`.
    pub fn binary<F>(body: F) -> Self
    where
        F: Fn(Value, Value) -> Value + Send + Sync + 'static,
    {
        Self::new(move |arguments| {
            let first = arguments.first().cloned().unwrap_or_default();
            let second = arguments.get(1).cloned().unwrap_or_default();
            Ok(body(first, second))
        })
    }

    /// Wraps an infallible predicate of one argument.
    pub fn predicate<F>(body: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(move |arguments| {
            Ok(Value::Bool(body(arguments.first().unwrap_or(&Value::Null))))
        })
    }

    /// Calls the function with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped closure produces.
    #[inline]
    pub fn call(&self, arguments: &[Value]) -> Result<Value, Error> {
        (self.body)(arguments)
    }

    /// Returns `true` if both functions share the same closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Function({:p})", Arc::as_ptr(&self.body).cast::<()>())
    }
}

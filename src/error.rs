//! Error type shared by every fallible operation of the crate.
//!
//! Errors raised by caller-supplied closures are never wrapped: typed APIs
//! (`try_*` variants, [`Optional::or_else_throw`]) hand the caller's own
//! error back unchanged. [`Error`] covers the contract violations the crate
//! itself detects and the failures of dynamic [`Function`] values.
//!
//! [`Optional::or_else_throw`]: crate::monad::Optional::or_else_throw
//! [`Function`]: crate::value::Function

use thiserror::Error;

/// Represents the errors produced by `traverso`.
///
/// # Examples
///
/// ```rust
/// use traverso::Error;
///
/// let error = Error::invalid_argument("handler must be callable");
/// assert_eq!(error.to_string(), "invalid argument: handler must be callable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A caller-supplied argument broke a basic type or arity contract,
    /// e.g. a non-callable close handler or a zero arity for `curry`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not supported by the receiver, e.g. assigning a key
    /// through a read-only [`Chain`](crate::monad::Chain).
    #[error("illegal operation: {0}")]
    IllegalOperation(String),

    /// An error raised by a caller-supplied dynamic function.
    #[error("{0}")]
    UserSupplied(String),
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates an [`Error::IllegalOperation`].
    pub fn illegal_operation(message: impl Into<String>) -> Self {
        Self::IllegalOperation(message.into())
    }

    /// Creates an [`Error::UserSupplied`].
    ///
    /// This is the constructor dynamic functions use to report failure.
    ///
    /// ```rust
    /// use traverso::Error;
    /// use traverso::value::Function;
    ///
    /// let failing = Function::new(|_| Err(Error::user("boom")));
    /// assert_eq!(failing.call(&[]), Err(Error::user("boom")));
    /// ```
    pub fn user(message: impl Into<String>) -> Self {
        Self::UserSupplied(message.into())
    }
}

//! Monadic wrappers over dynamic values.
//!
//! - [`Monad`]: the shared abstraction, with the plain [`Identity`] monad
//! - [`Optional`]: a value that may be absent
//! - [`Chain`]: safe navigation through keys, properties and calls
//! - [`Stream`]: an eager pipeline over a normalized collection
//!
//! Every wrapper is immutable: transformations return a new instance, and
//! the empty `Optional` and `Chain` are process-wide singletons.
//!
//! # Examples
//!
//! ```rust
//! use traverso::monad::{chain, optional, stream};
//! use traverso::traversable;
//! use traverso::value::Value;
//!
//! let total = stream(traversable![1, 2, 3]).sum();
//! assert_eq!(total.or_else(0), Value::Int(6));
//!
//! assert!(optional(Value::Null).is_absent());
//! assert!(chain(traversable!["a" => 1]).get_key("b").is_empty());
//! ```

mod base;
mod chain;
mod optional;
mod stream;

pub use base::{Identity, Monad};
pub use chain::Chain;
pub use optional::Optional;
pub use stream::Stream;

/// Builds a [`Stream`] from any input.
#[inline]
pub fn stream(value: impl Into<crate::value::Value>) -> Stream {
    Stream::of(value)
}

/// Builds an [`Optional`] from any input.
#[inline]
pub fn optional(value: impl Into<crate::value::Value>) -> Optional {
    Optional::of(value)
}

/// Starts a [`Chain`] at any input.
#[inline]
pub fn chain(value: impl Into<crate::value::Value>) -> Chain {
    Chain::of(value)
}

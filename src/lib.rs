//! # traverso
//!
//! Functional utilities over dynamically-typed values: a traversal
//! normalizer, eager transform primitives, and absence-safe monads.
//!
//! ## Overview
//!
//! - **Dynamic values**: [`Value`](value::Value), ordered
//!   [`Traversable`](value::Traversable) collections, dynamic
//!   [`Function`](value::Function)s and capability-based
//!   [`Object`](value::Object)s
//! - **Normalization**: any value becomes a traversable, see
//!   [`convert::to_array`]
//! - **Transform primitives**: map, filter, reduce, flatten, sort, merge,
//!   walk, randomize
//! - **Monads**: `Optional`, `Chain` and `Stream`
//! - **Statistics** and quantifiers over collections
//! - **Function combinators**: curry, sequence, decorate, ...
//!
//! ## Feature Flags
//!
//! - `convert`: normalizer and transform primitives
//! - `meta`: quantifiers and statistics
//! - `monad`: `Monad`, `Identity`, `Optional`, `Chain`, `Stream`
//! - `func`: dynamic function combinators
//! - `serde`: serialization of values and statistics
//! - `fxhash`: faster hashing for traversable key lookup
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use traverso::prelude::*;
//! use traverso::traversable;
//!
//! let total = Stream::of(traversable![1, 2, 3, 4])
//!     .filter(|value, _| value.as_i64().is_some_and(|n| n % 2 == 0))
//!     .sum();
//! assert_eq!(total.or_else(0), Value::Int(6));
//!
//! let city = Chain::of(traversable!["address" => traversable!["city" => "Oslo"]])
//!     .get_key("address")
//!     .get_key("city")
//!     .result();
//! assert_eq!(city, Optional::of("Oslo"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, traits and functions.
///
/// # Usage
///
/// ```rust
/// use traverso::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Error;
    pub use crate::value::*;

    #[cfg(feature = "convert")]
    pub use crate::convert::*;

    #[cfg(feature = "meta")]
    pub use crate::meta::*;

    #[cfg(feature = "monad")]
    pub use crate::monad::*;

    #[cfg(feature = "func")]
    pub use crate::func::*;
}

pub mod error;
pub mod value;

#[cfg(feature = "convert")]
pub mod convert;

#[cfg(feature = "meta")]
pub mod meta;

#[cfg(feature = "monad")]
pub mod monad;

#[cfg(feature = "func")]
pub mod func;

pub use error::Error;

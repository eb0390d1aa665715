//! Normalization and transform primitives.
//!
//! This module provides the traversal normalizer and the eager primitives
//! built on top of it. Every primitive accepts any input convertible into a
//! [`Value`](crate::value::Value), normalizes it with [`to_array`], and
//! returns a fresh [`Traversable`](crate::value::Traversable).
//!
//! # Overview
//!
//! - [`to_array`], [`to_array_like`]: the normalizer
//! - [`traversable_map`], [`traversable_filter`], [`traversable_reduce`]
//!   and their fallible `try_` counterparts
//! - [`traversable_flatten`], [`traversable_sort`], [`traversable_sort_by`]
//! - [`traversable_merge`], [`traversable_walk`], [`traversable_randomize`]
//! - [`traversable_slice`], [`traversable_reverse`], [`traversable_flip`],
//!   [`traversable_unique`], [`traversable_values`]
//!
//! # Examples
//!
//! ```rust
//! use traverso::convert::{to_array, traversable_filter, traversable_map};
//! use traverso::traversable;
//! use traverso::value::Value;
//!
//! let evens = traversable_filter(
//!     |value, _| value.as_i64().is_some_and(|n| n % 2 == 0),
//!     traversable![1, 2, 3, 4],
//!     false,
//! );
//! let scaled = traversable_map(|value, _| Value::Int(value.as_i64().unwrap_or(0) * 10), evens, false);
//! assert_eq!(scaled, traversable![20, 40]);
//!
//! assert_eq!(to_array("text", false), traversable!["text"]);
//! ```

mod filter;
mod flatten;
mod map;
mod merge;
mod normalize;
mod reduce;
mod reshape;
mod sort;

pub use filter::{traversable_filter, try_traversable_filter};
pub use flatten::traversable_flatten;
pub use map::{traversable_map, try_traversable_map};
pub use merge::{traversable_merge, traversable_randomize, traversable_randomize_with, traversable_walk};
pub use normalize::{Shape, to_array, to_array_like};
pub use reduce::{traversable_reduce, try_traversable_reduce};
pub use reshape::{
    traversable_flip, traversable_reverse, traversable_slice, traversable_unique, traversable_values,
};
pub use sort::{traversable_sort, traversable_sort_by};

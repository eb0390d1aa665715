//! Quantifiers, capability predicates and statistics.
//!
//! - [`all_match`], [`any_match`], [`none_match`]: predicates over the
//!   values of any normalized input
//! - [`is_traversable`], [`is_like_array`]: capability checks
//! - [`Statistics`]: descriptive statistics of a collection
//!
//! # Examples
//!
//! ```rust
//! use traverso::meta::{Statistics, any_match};
//! use traverso::traversable;
//! use traverso::value::Value;
//!
//! let input = traversable![3, 1, 2];
//! assert!(any_match(|value| value == &Value::Int(2), input.clone()));
//! assert_eq!(Statistics::new(input).median_average(), 2.0);
//! ```

mod matching;
mod statistics;

pub use matching::{all_match, any_match, is_like_array, is_traversable, none_match};
pub use statistics::{Statistics, statistics};

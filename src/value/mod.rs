//! The dynamic value model.
//!
//! Every operation of the crate works on [`Value`]: a sum of scalars, ordered
//! key→value collections ([`Traversable`]), objects exposing
//! [`Object`] capabilities, and callables ([`Function`]).
//!
//! # Examples
//!
//! ```rust
//! use traverso::traversable;
//! use traverso::value::{Key, Value};
//!
//! let row = Value::from(traversable!["id" => 7, "tags" => traversable!["a", "b"]]);
//! let tags = row.as_traversable().and_then(|entries| entries.get(&Key::from("tags")));
//! assert_eq!(tags, Some(&Value::from(traversable!["a", "b"])));
//! ```

mod compare;
mod dynamic;
mod function;
mod key;
mod object;
#[cfg(feature = "serde")]
mod serde;
mod traversable;

pub use compare::{SortFlags, compare_regular, loose_eq};
pub use dynamic::{Number, Value};
pub use function::Function;
pub use key::Key;
pub use object::{Collection, Object, Record};
pub use traversable::Traversable;

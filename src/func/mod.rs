//! Combinators over dynamic [`Function`](crate::value::Function) values.
//!
//! Every combinator returns a new `Function`; the wrapped functions are
//! shared, never modified.
//!
//! - [`conditionally`], [`negation`], [`sequence`], [`decorate`],
//!   [`catch_ex`]: wrap functions into a new one
//! - [`curry`]: fixed-arity partial application
//! - [`method_caller`], [`property_getter`], [`array_value_getter`],
//!   [`pass_through`]: read from the argument
//!
//! # Examples
//!
//! ```rust
//! use traverso::func::{array_value_getter, negation, sequence};
//! use traverso::traversable;
//! use traverso::value::{Function, Value};
//!
//! let has_no_name = sequence(array_value_getter("name"), [negation(Function::predicate(Value::is_truthy))]);
//! assert_eq!(has_no_name.call(&[Value::from(traversable!["name" => ""])]), Ok(Value::Bool(true)));
//! ```

mod accessors;
mod combinators;
mod curry;

pub use accessors::{array_value_getter, method_caller, pass_through, property_getter};
pub use combinators::{catch_ex, conditionally, decorate, negation, sequence};
pub use curry::curry;

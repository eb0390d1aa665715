//! Combinators that wrap one or more functions into a new one.

use crate::convert::to_array;
use crate::value::{Function, Traversable, Value};

/// Calls `action` when `predicate` holds for the arguments, `else_action`
/// otherwise.
///
/// Both branches receive the original arguments. Without an else branch a
/// failed predicate gives `Null`.
///
/// # Arguments
///
/// * `predicate` - decides the branch from the truthiness of its result
/// * `action` - called when the predicate is truthy
/// * `else_action` - called when it is not
///
/// # Examples
///
/// ```rust
/// use traverso::func::conditionally;
/// use traverso::value::{Function, Value};
///
/// let positive = Function::predicate(|value| value.as_i64().is_some_and(|n| n > 0));
/// let double = Function::unary(|value| Value::Int(value.as_i64().unwrap_or(0) * 2));
///
/// let double_positive = conditionally(positive, double, None);
/// assert_eq!(double_positive.call(&[Value::Int(4)]), Ok(Value::Int(8)));
/// assert_eq!(double_positive.call(&[Value::Int(-4)]), Ok(Value::Null));
/// ```
pub fn conditionally(predicate: Function, action: Function, else_action: Option<Function>) -> Function {
    Function::new(move |arguments| {
        if predicate.call(arguments)?.is_truthy() {
            action.call(arguments)
        } else {
            else_action
                .as_ref()
                .map_or(Ok(Value::Null), |otherwise| otherwise.call(arguments))
        }
    })
}

/// Returns the boolean negation of `function`'s result.
///
/// ```rust
/// use traverso::func::negation;
/// use traverso::value::{Function, Value};
///
/// let is_null = Function::predicate(Value::is_null);
/// assert_eq!(negation(is_null).call(&[Value::Int(0)]), Ok(Value::Bool(true)));
/// ```
pub fn negation(function: Function) -> Function {
    Function::new(move |arguments| Ok(Value::Bool(!function.call(arguments)?.is_truthy())))
}

/// Composes functions left to right.
///
/// `first` receives every argument; each subsequent function receives the
/// previous result as its only argument.
///
/// # Examples
///
/// ```rust
/// use traverso::func::sequence;
/// use traverso::value::{Function, Value};
///
/// let add = Function::binary(|left, right| {
///     Value::Int(left.as_i64().unwrap_or(0) + right.as_i64().unwrap_or(0))
/// });
/// let square = Function::unary(|value| {
///     let number = value.as_i64().unwrap_or(0);
///     Value::Int(number * number)
/// });
///
/// let add_then_square = sequence(add, [square]);
/// assert_eq!(add_then_square.call(&[Value::Int(2), Value::Int(3)]), Ok(Value::Int(25)));
/// ```
pub fn sequence<I>(first: Function, subsequent: I) -> Function
where
    I: IntoIterator<Item = Function>,
{
    let subsequent: Vec<Function> = subsequent.into_iter().collect();
    Function::new(move |arguments| {
        subsequent
            .iter()
            .try_fold(first.call(arguments)?, |result, function| function.call(&[result]))
    })
}

/// Lets `decorator` rewrite the arguments before `function` is called.
///
/// The decorator receives the arguments as one list; its result is
/// normalized into the new argument list (`Null` gives no arguments, a
/// scalar a single one).
///
/// # Examples
///
/// ```rust
/// use traverso::func::decorate;
/// use traverso::traversable;
/// use traverso::value::{Function, Value};
///
/// let first = Function::unary(|value| value);
/// let reversed = Function::unary(|arguments| {
///     let mut values = arguments.as_traversable().map(|list| list.clone().into_values()).unwrap_or_default();
///     values.reverse();
///     Value::from(values)
/// });
///
/// let last = decorate(first, reversed);
/// assert_eq!(last.call(&[Value::Int(1), Value::Int(2), Value::Int(3)]), Ok(Value::Int(3)));
/// ```
pub fn decorate(function: Function, decorator: Function) -> Function {
    Function::new(move |arguments| {
        let list = Traversable::from_values(arguments.iter().cloned());
        let decorated = to_array(decorator.call(&[Value::Array(list)])?, false);
        function.call(&decorated.into_values())
    })
}

/// Recovers from an error of `function` with `handler`.
///
/// On error, `handler` is called with the error message and the original
/// arguments as a list, and its result replaces the failed one.
///
/// # Examples
///
/// ```rust
/// use traverso::Error;
/// use traverso::func::catch_ex;
/// use traverso::value::{Function, Value};
///
/// let parse = Function::unary(|value| value);
/// let failing = Function::new(|_| Err(Error::user("unreachable host")));
/// let fallback = Function::binary(|message, _| Value::from(format!("recovered: {message}")));
///
/// assert_eq!(catch_ex(parse, fallback.clone()).call(&[Value::Int(1)]), Ok(Value::Int(1)));
/// assert_eq!(
///     catch_ex(failing, fallback).call(&[]),
///     Ok(Value::from("recovered: unreachable host")),
/// );
/// ```
pub fn catch_ex(function: Function, handler: Function) -> Function {
    Function::new(move |arguments| match function.call(arguments) {
        Ok(result) => Ok(result),
        Err(error) => {
            tracing::debug!(%error, "recovering from function error");
            let list = Traversable::from_values(arguments.iter().cloned());
            handler.call(&[Value::from(error.to_string()), Value::Array(list)])
        }
    })
}

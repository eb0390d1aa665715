//! Fixed-arity currying of dynamic functions.

use std::sync::Arc;

use crate::Error;
use crate::value::{Function, Value};

/// Curries `function` into a chain of one-argument functions.
///
/// Each call takes its first argument (`Null` when called without any) and
/// returns a new function holding the arguments collected so far, until
/// `arity` arguments are collected and `function` is called with them.
/// Partial applications are independent: reusing one never affects another.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `arity` is zero.
///
/// # Examples
///
/// ```rust
/// use traverso::func::curry;
/// use traverso::value::{Function, Value};
///
/// let volume = Function::new(|arguments| {
///     Ok(Value::Int(arguments.iter().filter_map(Value::as_i64).product()))
/// });
/// let curried = curry(volume, 3)?;
///
/// let base = curried.call(&[Value::Int(2)])?;
/// let base = base.as_function().cloned().unwrap_or(curried);
/// let area = base.call(&[Value::Int(3)])?;
/// let area = area.as_function().cloned().unwrap_or(base);
///
/// assert_eq!(area.call(&[Value::Int(4)])?, Value::Int(24));
/// assert_eq!(area.call(&[Value::Int(5)])?, Value::Int(30));
/// # Ok::<(), traverso::Error>(())
/// ```
pub fn curry(function: Function, arity: usize) -> Result<Function, Error> {
    if arity == 0 {
        return Err(Error::invalid_argument("number of arguments must be greater than zero"));
    }
    Ok(collector(function, arity, Arc::from([])))
}

fn collector(function: Function, arity: usize, collected: Arc<[Value]>) -> Function {
    Function::new(move |arguments| {
        let mut next = Vec::with_capacity(collected.len() + 1);
        next.extend_from_slice(&collected);
        next.push(arguments.first().cloned().unwrap_or_default());
        if next.len() == arity {
            function.call(&next)
        } else {
            Ok(Value::Function(collector(function.clone(), arity, next.into())))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn concat() -> Function {
        Function::new(|arguments| {
            Ok(Value::from(
                arguments.iter().map(ToString::to_string).collect::<String>(),
            ))
        })
    }

    fn apply(function: &Value, argument: &str) -> Value {
        function
            .call(&[Value::from(argument)])
            .unwrap()
    }

    #[rstest]
    fn zero_arity_is_rejected() {
        assert!(matches!(curry(concat(), 0), Err(Error::InvalidArgument(_))));
    }

    #[rstest]
    fn arity_one_calls_immediately() {
        let curried = Value::Function(curry(concat(), 1).unwrap());
        assert_eq!(apply(&curried, "a"), Value::from("a"));
    }

    #[rstest]
    fn partial_applications_are_independent() {
        let curried = Value::Function(curry(concat(), 2).unwrap());
        let with_a = apply(&curried, "a");
        let with_b = apply(&curried, "b");
        assert_eq!(apply(&with_a, "1"), Value::from("a1"));
        assert_eq!(apply(&with_b, "2"), Value::from("b2"));
        assert_eq!(apply(&with_a, "3"), Value::from("a3"));
    }

    #[rstest]
    fn only_the_first_argument_of_each_call_counts() {
        let curried = curry(concat(), 2).unwrap();
        let partial = curried
            .call(&[Value::from("x"), Value::from("ignored")])
            .unwrap();
        assert_eq!(apply(&partial, "y"), Value::from("xy"));
    }

    #[rstest]
    fn missing_arguments_are_null() {
        let curried = curry(Function::unary(|value| Value::Bool(value.is_null())), 1).unwrap();
        assert_eq!(curried.call(&[]), Ok(Value::Bool(true)));
    }
}

//! Functions that read from their argument.

use crate::Error;
use crate::value::{Function, Key, Traversable, Value};

/// Returns a function calling the method `name` of its argument with fixed
/// `arguments`.
///
/// # Examples
///
/// ```rust
/// use traverso::func::method_caller;
/// use traverso::traversable;
/// use traverso::value::{Collection, Value};
///
/// let count = method_caller("count", traversable![]);
/// let collection = Collection::new(traversable![1, 2, 3]).into_value();
/// assert_eq!(count.call(&[collection]), Ok(Value::Int(3)));
/// assert!(count.call(&[Value::Int(1)]).is_err());
/// ```
pub fn method_caller(name: impl Into<String>, arguments: Traversable) -> Function {
    let name = name.into();
    let arguments = arguments.into_values();
    Function::new(move |call_arguments| match call_arguments.first() {
        Some(Value::Object(object)) => object.call_method(&name, &arguments),
        target => Err(Error::invalid_argument(format!(
            "cannot call method {name} on {}",
            target.map_or("nothing", Value::type_name)
        ))),
    })
}

/// Returns a function reading the property `name` of its argument, `Null`
/// when it has none.
pub fn property_getter(name: impl Into<String>) -> Function {
    let name = name.into();
    Function::unary(move |target| {
        target
            .as_object()
            .and_then(|object| object.property(&name))
            .unwrap_or_default()
    })
}

/// Returns a function reading `key` from its argument, `Null` when the key
/// is missing.
///
/// Arrays and objects supporting keyed access are read.
///
/// # Examples
///
/// ```rust
/// use traverso::func::array_value_getter;
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// let name = array_value_getter("name");
/// assert_eq!(name.call(&[Value::from(traversable!["name" => "Ada"])]), Ok(Value::from("Ada")));
/// assert_eq!(name.call(&[Value::from(traversable![])]), Ok(Value::Null));
/// ```
pub fn array_value_getter(key: impl Into<Key>) -> Function {
    let key = key.into();
    Function::unary(move |target| match &target {
        Value::Array(traversable) => traversable.get(&key).cloned().unwrap_or_default(),
        Value::Object(object) if object.supports_keys() => object.key(&key).unwrap_or_default(),
        _ => Value::Null,
    })
}

/// Returns a function giving back its first argument.
pub fn pass_through() -> Function {
    Function::unary(|value| value)
}

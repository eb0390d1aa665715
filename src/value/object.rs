//! Object capabilities of dynamic values.
//!
//! An [`Object`] is an opaque value that may expose any combination of four
//! capabilities: named properties, named methods, keyed access, and
//! iteration. Each capability defaults to "absent", so an implementation only
//! overrides what it supports. The normalizer and [`Chain`] consult these
//! capabilities instead of inspecting concrete types.
//!
//! [`Chain`]: crate::monad::Chain

use std::collections::BTreeMap;
use std::fmt;

use super::{Function, Key, Traversable, Value};
use crate::Error;

/// Capabilities of an object-like dynamic value.
///
/// # Examples
///
/// ```rust
/// use traverso::value::{Key, Object, Traversable, Value};
/// use traverso::traversable;
///
/// #[derive(Debug)]
/// struct Range(i64);
///
/// impl Object for Range {
///     fn class_name(&self) -> &str {
///         "Range"
///     }
///
///     fn iterate(&self) -> Option<Traversable> {
///         Some((0..self.0).map(Value::Int).collect())
///     }
/// }
///
/// let range = Range(3);
/// assert_eq!(range.iterate(), Some(traversable![0, 1, 2]));
/// assert!(range.property("length").is_none());
/// ```
pub trait Object: fmt::Debug + Send + Sync {
    /// A human-readable type name, also used as the object's string form.
    fn class_name(&self) -> &str {
        "object"
    }

    /// Returns the named property if the object exposes it.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Returns `true` if the object exposes a callable member `name`.
    fn has_method(&self, _name: &str) -> bool {
        false
    }

    /// Invokes the method `name`.
    ///
    /// # Errors
    ///
    /// The default implementation fails with [`Error::IllegalOperation`];
    /// implementations report their own failures.
    fn call_method(&self, name: &str, _arguments: &[Value]) -> Result<Value, Error> {
        Err(Error::illegal_operation(format!(
            "{} has no method {name}",
            self.class_name()
        )))
    }

    /// Returns `true` if the object supports keyed access.
    fn supports_keys(&self) -> bool {
        false
    }

    /// Returns the value stored under `key`, if keyed access is supported.
    fn key(&self, _key: &Key) -> Option<Value> {
        None
    }

    /// Returns a snapshot of the object's entries if it is iterable.
    fn iterate(&self) -> Option<Traversable> {
        None
    }
}

/// A general-purpose object with named properties and methods.
///
/// Properties are kept in insertion order. A record can additionally be
/// marked iterable, in which case iterating yields its properties, and keyed,
/// in which case keys address its properties.
///
/// # Examples
///
/// ```rust
/// use traverso::value::{Function, Object, Record, Value};
///
/// let point = Record::new("Point")
///     .with_property("x", 3)
///     .with_property("y", 4)
///     .with_method(
///         "scale",
///         Function::unary(|factor| Value::Int(factor.as_i64().unwrap_or(1) * 5)),
///     );
///
/// assert_eq!(point.property("x"), Some(Value::Int(3)));
/// assert!(point.has_method("scale"));
/// assert_eq!(point.call_method("scale", &[Value::Int(2)]), Ok(Value::Int(10)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    class_name: String,
    properties: Traversable,
    methods: BTreeMap<String, Function>,
    iterable: bool,
    keyed: bool,
}

impl Record {
    /// Creates an empty record of the given class name.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Adds (or replaces) a property.
    #[must_use]
    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(Key::Name(name.to_string()), value);
        self
    }

    /// Adds (or replaces) a method.
    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>, method: Function) -> Self {
        self.methods.insert(name.into(), method);
        self
    }

    /// Makes the record iterable over its properties.
    #[must_use]
    pub const fn iterable(mut self) -> Self {
        self.iterable = true;
        self
    }

    /// Makes the record addressable by key, keys naming properties.
    #[must_use]
    pub const fn keyed(mut self) -> Self {
        self.keyed = true;
        self
    }

    /// Wraps the record into a [`Value::Object`].
    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl Object for Record {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(&Key::Name(name.to_string())).cloned()
    }

    fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn call_method(&self, name: &str, arguments: &[Value]) -> Result<Value, Error> {
        self.methods.get(name).map_or_else(
            || {
                Err(Error::illegal_operation(format!(
                    "{} has no method {name}",
                    self.class_name
                )))
            },
            |method| method.call(arguments),
        )
    }

    fn supports_keys(&self) -> bool {
        self.keyed
    }

    fn key(&self, key: &Key) -> Option<Value> {
        if !self.keyed {
            return None;
        }
        let name = Key::Name(key.to_string());
        self.properties.get(&name).cloned()
    }

    fn iterate(&self) -> Option<Traversable> {
        self.iterable.then(|| self.properties.clone())
    }
}

/// An iterable, keyed object wrapping a [`Traversable`].
///
/// `Collection` is the object counterpart of an array: the normalizer
/// snapshots it into a plain traversable, while
/// [`to_array_like`](crate::convert::to_array_like) keeps it as is. It also
/// exposes a `count` method.
///
/// # Examples
///
/// ```rust
/// use traverso::value::{Collection, Key, Object, Value};
/// use traverso::traversable;
///
/// let collection = Collection::new(traversable!["a" => 1, "b" => 2]);
/// assert_eq!(collection.key(&Key::from("b")), Some(Value::Int(2)));
/// assert_eq!(collection.call_method("count", &[]), Ok(Value::Int(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    entries: Traversable,
}

impl Collection {
    /// Wraps the given entries.
    pub const fn new(entries: Traversable) -> Self {
        Self { entries }
    }

    /// Returns the wrapped entries.
    pub const fn entries(&self) -> &Traversable {
        &self.entries
    }

    /// Wraps the collection into a [`Value::Object`].
    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl Object for Collection {
    fn class_name(&self) -> &str {
        "Collection"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "count"
    }

    fn call_method(&self, name: &str, _arguments: &[Value]) -> Result<Value, Error> {
        if name == "count" {
            Ok(Value::from(self.entries.len()))
        } else {
            Err(Error::illegal_operation(format!("Collection has no method {name}")))
        }
    }

    fn supports_keys(&self) -> bool {
        true
    }

    fn key(&self, key: &Key) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn iterate(&self) -> Option<Traversable> {
        Some(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversable;
    use rstest::rstest;

    #[derive(Debug)]
    struct Opaque;

    impl Object for Opaque {}

    #[rstest]
    fn default_capabilities_are_absent() {
        let opaque = Opaque;
        assert_eq!(opaque.class_name(), "object");
        assert!(opaque.property("anything").is_none());
        assert!(!opaque.has_method("anything"));
        assert!(!opaque.supports_keys());
        assert!(opaque.key(&Key::Index(0)).is_none());
        assert!(opaque.iterate().is_none());
        assert!(matches!(
            opaque.call_method("anything", &[]),
            Err(Error::IllegalOperation(_))
        ));
    }

    #[rstest]
    fn record_properties_keep_insertion_order_when_iterated() {
        let record = Record::new("Row")
            .with_property("b", 2)
            .with_property("a", 1)
            .iterable();
        assert_eq!(record.iterate(), Some(traversable!["b" => 2, "a" => 1]));
    }

    #[rstest]
    fn record_is_not_iterable_by_default() {
        assert!(Record::new("Row").with_property("a", 1).iterate().is_none());
    }

    #[rstest]
    fn keyed_record_resolves_keys_to_properties() {
        let record = Record::new("Row").with_property("a", 1).keyed();
        assert!(record.supports_keys());
        assert_eq!(record.key(&Key::from("a")), Some(Value::Int(1)));
        assert_eq!(record.key(&Key::from("z")), None);
    }

    #[rstest]
    fn record_unknown_method_is_illegal() {
        let record = Record::new("Row");
        assert!(matches!(
            record.call_method("missing", &[]),
            Err(Error::IllegalOperation(_))
        ));
    }

    #[rstest]
    fn collection_exposes_count_keys_and_iteration() {
        let collection = Collection::new(traversable![10, 20, 30]);
        assert_eq!(collection.call_method("count", &[]), Ok(Value::Int(3)));
        assert_eq!(collection.key(&Key::Index(1)), Some(Value::Int(20)));
        assert_eq!(collection.iterate(), Some(traversable![10, 20, 30]));
        assert!(!collection.has_method("push"));
    }
}

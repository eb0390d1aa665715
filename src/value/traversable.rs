//! The canonical ordered key→value collection.

use std::fmt;
use std::sync::Arc;

use super::{Key, Value};

#[cfg(feature = "fxhash")]
type KeyIndex = rustc_hash::FxHashMap<Key, usize>;

#[cfg(not(feature = "fxhash"))]
type KeyIndex = std::collections::HashMap<Key, usize>;

#[derive(Clone, Default)]
struct Entries {
    entries: Vec<(Key, Value)>,
    positions: KeyIndex,
    greatest_index: Option<i64>,
}

/// An ordered sequence of (key, value) pairs with unique keys.
///
/// Insertion order is preserved. Inserting under an existing key replaces
/// the value in place, keeping the original position. [`push`](Self::push)
/// appends under the next free integer index: one past the greatest integer
/// key inserted so far, or `0`.
///
/// Storage is copy-on-write: cloning a `Traversable` is O(1) and the clones
/// only diverge when one of them is modified.
///
/// # Examples
///
/// ```rust
/// use traverso::value::{Key, Traversable, Value};
///
/// let mut traversable = Traversable::new();
/// traversable.insert("name", "Ada");
/// traversable.push(10);
/// traversable.insert(5, 20);
/// traversable.push(30);
///
/// let keys: Vec<Key> = traversable.keys().cloned().collect();
/// assert_eq!(keys, vec![Key::from("name"), Key::Index(0), Key::Index(5), Key::Index(6)]);
/// assert_eq!(traversable.get(&Key::Index(6)), Some(&Value::Int(30)));
/// ```
#[derive(Clone, Default)]
pub struct Traversable {
    inner: Arc<Entries>,
}

impl Traversable {
    /// Creates an empty traversable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty traversable with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Entries {
                entries: Vec::with_capacity(capacity),
                positions: KeyIndex::with_capacity_and_hasher(capacity, Default::default()),
                greatest_index: None,
            }),
        }
    }

    /// Builds a list: values keyed `0..n` in iteration order.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut traversable = Self::new();
        for value in values {
            traversable.push(value);
        }
        traversable
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.inner
            .positions
            .get(key)
            .map(|&position| &self.inner.entries[position].1)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.inner.positions.contains_key(key)
    }

    /// Returns the entry at the given position.
    pub fn get_index(&self, position: usize) -> Option<(&Key, &Value)> {
        self.inner.entries.get(position).map(|(key, value)| (key, value))
    }

    /// Returns the first entry.
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.get_index(0)
    }

    /// Returns the last entry.
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.inner.entries.last().map(|(key, value)| (key, value))
    }

    /// Inserts `value` under `key`, returning the replaced value if any.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        let inner = Arc::make_mut(&mut self.inner);
        if let Some(&position) = inner.positions.get(&key) {
            return Some(std::mem::replace(&mut inner.entries[position].1, value));
        }
        if let Key::Index(index) = key {
            inner.greatest_index = Some(inner.greatest_index.map_or(index, |greatest| greatest.max(index)));
        }
        inner.positions.insert(key.clone(), inner.entries.len());
        inner.entries.push((key, value));
        None
    }

    /// Appends `value` under the next free integer index and returns that key.
    ///
    /// Returns `None` and leaves the traversable unchanged once `i64::MAX`
    /// is in use as a key, since no greater index exists.
    pub fn push(&mut self, value: impl Into<Value>) -> Option<Key> {
        let next = match self.inner.greatest_index {
            None => 0,
            Some(greatest) => {
                let Some(next) = greatest.checked_add(1) else {
                    tracing::warn!(greatest, "no free index left, value not appended");
                    return None;
                };
                next
            }
        };
        let key = Key::Index(next);
        self.insert(key.clone(), value);
        Some(key)
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> + ExactSizeIterator {
        self.inner.entries.iter().map(|(key, value)| (key, value))
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator {
        self.inner.entries.iter().map(|(key, _)| key)
    }

    /// Iterates over the values in order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.inner.entries.iter().map(|(_, value)| value)
    }

    /// Consumes the traversable, returning its entries in order.
    pub fn into_entries(self) -> Vec<(Key, Value)> {
        Arc::unwrap_or_clone(self.inner).entries
    }

    /// Consumes the traversable, returning its values in order.
    pub fn into_values(self) -> Vec<Value> {
        self.into_entries().into_iter().map(|(_, value)| value).collect()
    }

    /// Returns `true` if the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.keys()
            .zip(0_i64..)
            .all(|(key, expected)| *key == Key::Index(expected))
    }

    /// Returns `true` if both traversables share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Traversable {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.entries == other.inner.entries
    }
}

impl fmt::Debug for Traversable {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Traversable
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut traversable = Self::new();
        traversable.extend(iter);
        traversable
    }
}

impl FromIterator<Value> for Traversable {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<K, V> Extend<(K, V)> for Traversable
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Traversable {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_entries().into_iter()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Traversable {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Traversable {
    fn from(values: [T; N]) -> Self {
        Self::from_values(values)
    }
}

/// Builds a [`Traversable`](crate::value::Traversable).
///
/// Either a list of values (keyed `0..n`) or `key => value` pairs.
///
/// # Examples
///
/// ```rust
/// use traverso::traversable;
/// use traverso::value::{Key, Value};
///
/// let list = traversable![1, 2, 3];
/// assert!(list.is_list());
///
/// let map = traversable!["foo" => 1, "bar" => "two"];
/// assert_eq!(map.get(&Key::from("bar")), Some(&Value::from("two")));
///
/// let nested = traversable![traversable![1, 2], 3];
/// assert_eq!(nested.len(), 2);
/// ```
#[macro_export]
macro_rules! traversable {
    () => {
        $crate::value::Traversable::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut traversable = $crate::value::Traversable::new();
        $(
            traversable.insert($key, $value);
        )+
        traversable
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut traversable = $crate::value::Traversable::new();
        $(
            traversable.push($value);
        )+
        traversable
    }};
}

//! The eager `Stream` monad.
//!
//! A [`Stream`] holds a normalized [`Traversable`]. Pipeline stages build a
//! new stream right away; closing operations fire the registered close
//! handlers and compute a plain result.

use std::cmp::Ordering;
use std::fmt;
use std::iter;
use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;

use super::{Monad, Optional};
use crate::Error;
use crate::convert::{
    to_array, traversable_filter, traversable_flatten, traversable_flip, traversable_map, traversable_merge,
    traversable_randomize_with, traversable_reduce, traversable_reverse, traversable_slice, traversable_sort,
    traversable_sort_by, traversable_unique, traversable_walk, try_traversable_filter, try_traversable_map,
};
use crate::meta::{Statistics, all_match, any_match, none_match};
use crate::value::{Key, Number, SortFlags, Traversable, Value, compare_regular};

type CloseHandler = Arc<dyn Fn(&Traversable) + Send + Sync>;

/// An eagerly evaluated pipeline over a normalized collection.
///
/// Any input is accepted and normalized on construction: `Null` gives the
/// empty stream, a scalar a one-element stream, an iterable object the
/// snapshot of its entries.
///
/// # Stages and closing operations
///
/// Stages (`map_each`, `filter`, `sort`, ...) consume the stream and return
/// a new one carrying the same close handlers. Closing operations
/// (`find_first`, `sum`, `to_array`, ...) consume the stream, run every
/// close handler once in registration order with the final collection, and
/// then compute their result. A stream therefore closes at most once.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use traverso::monad::Stream;
/// use traverso::traversable;
/// use traverso::value::Value;
///
/// let closed = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&closed);
///
/// let result = Stream::of(traversable![1, 2, 3, 4])
///     .on_close(move |_| {
///         counter.fetch_add(1, Ordering::SeqCst);
///     })
///     .filter(|value, _| value.as_i64().is_some_and(|n| n % 2 == 0))
///     .map_each(|value, _| Value::Int(value.as_i64().unwrap_or(0) * 10))
///     .to_array();
///
/// assert_eq!(result, traversable![1 => 20, 3 => 40]);
/// assert_eq!(closed.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct Stream {
    entries: Traversable,
    close_handlers: SmallVec<[CloseHandler; 2]>,
}

impl Stream {
    /// Builds a stream from any input.
    #[inline]
    pub fn of(value: impl Into<Value>) -> Self {
        Self::create(value.into())
    }

    /// Returns a stream with no elements and no close handlers.
    pub fn empty() -> Self {
        Self::default()
    }

    fn pipe<F>(self, stage: F) -> Self
    where
        F: FnOnce(Traversable) -> Traversable,
    {
        Self {
            entries: stage(self.entries),
            close_handlers: self.close_handlers,
        }
    }

    fn close(self) -> Traversable {
        tracing::debug!(
            handlers = self.close_handlers.len(),
            entries = self.entries.len(),
            "stream closed"
        );
        for handler in &self.close_handlers {
            handler(&self.entries);
        }
        self.entries
    }

    // =========================================================================
    // Close handlers
    // =========================================================================

    /// Registers a handler run once when the stream closes.
    ///
    /// A panicking handler aborts the closing operation and the handlers
    /// registered after it.
    #[must_use]
    pub fn on_close<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Traversable) + Send + Sync + 'static,
    {
        self.close_handlers.push(Arc::new(handler));
        self
    }

    /// Registers dynamic callables as close handlers.
    ///
    /// `handlers` is a single callable or a (nested) traversable of them.
    /// Each handler receives the final collection as its only argument; its
    /// result is ignored and an error it returns is logged without stopping
    /// the other handlers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any of the values is not
    /// callable. No handler of this call is registered then.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use traverso::monad::Stream;
    /// use traverso::traversable;
    /// use traverso::value::{Function, Value};
    ///
    /// let log = Function::unary(|_| Value::Null);
    /// let stream = Stream::of(traversable![1]).on_close_callables(traversable![log.clone(), log])?;
    /// assert_eq!(stream.count(), 1);
    ///
    /// assert!(Stream::empty().on_close_callables("not a function").is_err());
    /// # Ok::<(), traverso::Error>(())
    /// ```
    pub fn on_close_callables(mut self, handlers: impl Into<Value>) -> Result<Self, Error> {
        let mut callables = Vec::new();
        collect_callables(handlers.into(), &mut callables)?;
        for callable in callables {
            let handler: CloseHandler = Arc::new(move |entries: &Traversable| {
                if let Err(error) = callable.call(&[Value::Array(entries.clone())]) {
                    tracing::warn!(%error, handler = callable.type_name(), "close handler failed");
                }
            });
            self.close_handlers.push(handler);
        }
        Ok(self)
    }

    // =========================================================================
    // Stages
    // =========================================================================

    /// Maps every value, keeping keys.
    #[must_use]
    pub fn map_each<F>(self, mapper: F) -> Self
    where
        F: FnMut(Value, &Key) -> Value,
    {
        self.pipe(|entries| traversable_map(mapper, entries, true))
    }

    /// Maps every value and re-indexes from `0`.
    #[must_use]
    pub fn map_values<F>(self, mapper: F) -> Self
    where
        F: FnMut(Value, &Key) -> Value,
    {
        self.pipe(|entries| traversable_map(mapper, entries, false))
    }

    /// Maps every value with a fallible mapper, keeping keys.
    ///
    /// # Errors
    ///
    /// Returns the first error of `mapper`, unchanged.
    pub fn try_map_each<F, E>(self, mapper: F) -> Result<Self, E>
    where
        F: FnMut(Value, &Key) -> Result<Value, E>,
    {
        let entries = try_traversable_map(mapper, self.entries, true)?;
        Ok(Self {
            entries,
            close_handlers: self.close_handlers,
        })
    }

    /// Keeps the values satisfying `predicate`, with their keys.
    #[must_use]
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.pipe(|entries| traversable_filter(predicate, entries, true))
    }

    /// Keeps the values satisfying `predicate` and re-indexes from `0`.
    #[must_use]
    pub fn filter_values<F>(self, predicate: F) -> Self
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.pipe(|entries| traversable_filter(predicate, entries, false))
    }

    /// Keeps the values satisfying a fallible predicate, with their keys.
    ///
    /// # Errors
    ///
    /// Returns the first error of `predicate`, unchanged.
    pub fn try_filter<F, E>(self, predicate: F) -> Result<Self, E>
    where
        F: FnMut(&Value, &Key) -> Result<bool, E>,
    {
        let entries = try_traversable_filter(predicate, self.entries, true)?;
        Ok(Self {
            entries,
            close_handlers: self.close_handlers,
        })
    }

    /// Recursively inlines nested collections.
    #[must_use]
    pub fn flatten(self, preserve_keys: bool) -> Self {
        self.pipe(|entries| traversable_flatten(entries, preserve_keys))
    }

    /// Drops duplicate values under loose comparison, keeping the first
    /// occurrence and its key.
    #[must_use]
    pub fn distinct(self) -> Self {
        self.distinct_with(SortFlags::Regular)
    }

    /// Drops values equal under `flags` to an earlier one.
    #[must_use]
    pub fn distinct_with(self, flags: SortFlags) -> Self {
        self.pipe(|entries| traversable_unique(entries, flags))
    }

    /// Swaps keys and values; values that cannot be keys are dropped.
    #[must_use]
    pub fn flip(self) -> Self {
        self.pipe(traversable_flip)
    }

    /// Keeps a window of the elements.
    ///
    /// A negative `offset` counts from the end; a negative `length` stops
    /// that many elements before the end; `None` runs to the end.
    #[must_use]
    pub fn slice(self, offset: i64, length: Option<i64>, preserve_keys: bool) -> Self {
        self.pipe(|entries| traversable_slice(entries, offset, length, preserve_keys))
    }

    /// Keeps at most the first `count` elements, re-indexed.
    #[must_use]
    pub fn limit(self, count: usize) -> Self {
        self.slice(0, Some(saturating_i64(count)), false)
    }

    /// Drops exactly the first `count` elements, re-indexing the rest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use traverso::monad::Stream;
    /// use traverso::traversable;
    ///
    /// assert_eq!(Stream::of(traversable![1, 2, 3, 4]).skip(1).to_array(), traversable![2, 3, 4]);
    /// ```
    #[must_use]
    pub fn skip(self, count: usize) -> Self {
        self.slice(saturating_i64(count), None, false)
    }

    /// Appends the normalized `others`; integer keys are renumbered and
    /// string keys overwritten.
    #[must_use]
    pub fn merge<I>(self, others: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.pipe(|entries| {
            traversable_merge(iter::once(Value::Array(entries)).chain(others.into_iter().map(Into::into)))
        })
    }

    /// Sorts the values with a built-in mode and re-indexes them.
    #[must_use]
    pub fn sort(self, flags: SortFlags) -> Self {
        self.pipe(|entries| traversable_sort(flags, entries))
    }

    /// Sorts the values with `comparator` and re-indexes them.
    #[must_use]
    pub fn sort_by<F>(self, comparator: F) -> Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.pipe(|entries| traversable_sort_by(comparator, entries))
    }

    /// Reverses the order of the elements.
    #[must_use]
    pub fn reverse(self, preserve_keys: bool) -> Self {
        self.pipe(|entries| traversable_reverse(entries, preserve_keys))
    }

    /// Shuffles the values with the thread-local generator.
    #[must_use]
    pub fn randomize(self) -> Self {
        self.randomize_with(&mut rand::rng())
    }

    /// Shuffles the values with `rng`.
    #[must_use]
    pub fn randomize_with<R>(self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        self.pipe(|entries| traversable_randomize_with(entries, rng))
    }

    // =========================================================================
    // Closing operations
    // =========================================================================

    /// Closes and returns the first value.
    pub fn find_first(self) -> Optional {
        let entries = self.close();
        Optional::from(entries.first().map(|(_, value)| value.clone()))
    }

    /// Closes and returns the first value satisfying `predicate`.
    pub fn find_first_by<F>(self, mut predicate: F) -> Optional
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        let entries = self.close();
        Optional::from(
            entries
                .iter()
                .find(|&(key, value)| predicate(value, key))
                .map(|(_, value)| value.clone()),
        )
    }

    /// Closes and returns the last value.
    pub fn find_last(self) -> Optional {
        let entries = self.close();
        Optional::from(entries.last().map(|(_, value)| value.clone()))
    }

    /// Closes and returns the last value satisfying `predicate`, searching
    /// from the end.
    pub fn find_last_by<F>(self, mut predicate: F) -> Optional
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        let entries = self.close();
        Optional::from(
            entries
                .iter()
                .rev()
                .find(|&(key, value)| predicate(value, key))
                .map(|(_, value)| value.clone()),
        )
    }

    /// Closes and returns a value picked at random.
    pub fn find_random(self) -> Optional {
        self.find_random_with(&mut rand::rng())
    }

    /// Closes and returns a value picked with `rng`.
    pub fn find_random_with<R>(self, rng: &mut R) -> Optional
    where
        R: Rng + ?Sized,
    {
        self.find_random_by_with(|_, _| true, rng)
    }

    /// Closes and returns a random value among those satisfying `predicate`.
    pub fn find_random_by<F>(self, predicate: F) -> Optional
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.find_random_by_with(predicate, &mut rand::rng())
    }

    /// Closes and returns a value picked with `rng` among those satisfying
    /// `predicate`.
    pub fn find_random_by_with<F, R>(self, mut predicate: F, rng: &mut R) -> Optional
    where
        F: FnMut(&Value, &Key) -> bool,
        R: Rng + ?Sized,
    {
        let entries = self.close();
        let candidates: Vec<&Value> = entries
            .iter()
            .filter(|&(key, value)| predicate(value, key))
            .map(|(_, value)| value)
            .collect();
        Optional::from(candidates.choose(rng).map(|value| (*value).clone()))
    }

    /// Closes and returns the smallest value under loose comparison.
    pub fn find_min(self) -> Optional {
        self.find_min_by(compare_regular)
    }

    /// Closes and returns the smallest value under `comparator`; the first
    /// of equal values wins.
    pub fn find_min_by<F>(self, mut comparator: F) -> Optional
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.find_extreme(|candidate, best| comparator(candidate, best) == Ordering::Less)
    }

    /// Closes and returns the largest value under loose comparison.
    pub fn find_max(self) -> Optional {
        self.find_max_by(compare_regular)
    }

    /// Closes and returns the largest value under `comparator`; the first
    /// of equal values wins.
    pub fn find_max_by<F>(self, mut comparator: F) -> Optional
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.find_extreme(|candidate, best| comparator(candidate, best) == Ordering::Greater)
    }

    fn find_extreme<F>(self, mut replaces: F) -> Optional
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        let entries = self.close();
        let mut values = entries.values();
        let Some(first) = values.next() else {
            return Optional::empty();
        };
        let extreme = values.fold(first, |best, candidate| {
            if replaces(candidate, best) { candidate } else { best }
        });
        Optional::of(extreme.clone())
    }

    /// Closes and returns the sum of the values.
    ///
    /// Integers are added as integers until a float appears or the addition
    /// overflows; numeric strings and booleans count as numbers, other
    /// values as `0`. Absent for an empty stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use traverso::monad::Stream;
    /// use traverso::traversable;
    /// use traverso::value::Value;
    ///
    /// assert_eq!(Stream::of(traversable![1, "2", true]).sum().or_else(0), Value::Int(4));
    /// assert_eq!(Stream::of(traversable![1, 0.5]).sum().or_else(0), Value::Float(1.5));
    /// assert!(Stream::empty().sum().is_absent());
    /// ```
    pub fn sum(self) -> Optional {
        let entries = self.close();
        if entries.is_empty() {
            return Optional::empty();
        }
        let total = entries
            .values()
            .map(|value| value.to_number().unwrap_or(Number::Int(0)))
            .fold(Number::Int(0), Number::add);
        Optional::of(total)
    }

    /// Closes and folds the values from the left, starting at `initial`.
    pub fn reduce<F>(self, callback: F, initial: impl Into<Value>) -> Optional
    where
        F: FnMut(Value, Value, &Key) -> Value,
    {
        Optional::create(traversable_reduce(callback, initial.into(), self.close()))
    }

    /// Closes and, if every value satisfies `predicate`, returns the result
    /// of `action` applied to the whole collection.
    pub fn if_all_match<P, A>(self, predicate: P, action: A) -> Optional
    where
        P: FnMut(&Value) -> bool,
        A: FnOnce(Traversable) -> Value,
    {
        let entries = self.close();
        if all_match(predicate, entries.clone()) {
            Optional::create(action(entries))
        } else {
            Optional::empty()
        }
    }

    /// Closes and, if any value satisfies `predicate`, returns the result of
    /// `action` applied to the whole collection.
    pub fn if_any_match<P, A>(self, predicate: P, action: A) -> Optional
    where
        P: FnMut(&Value) -> bool,
        A: FnOnce(Traversable) -> Value,
    {
        let entries = self.close();
        if any_match(predicate, entries.clone()) {
            Optional::create(action(entries))
        } else {
            Optional::empty()
        }
    }

    /// Closes and, if no value satisfies `predicate`, returns the result of
    /// `action` applied to the whole collection.
    pub fn if_none_match<P, A>(self, predicate: P, action: A) -> Optional
    where
        P: FnMut(&Value) -> bool,
        A: FnOnce(Traversable) -> Value,
    {
        let entries = self.close();
        if none_match(predicate, entries.clone()) {
            Optional::create(action(entries))
        } else {
            Optional::empty()
        }
    }

    /// Closes and computes [`Statistics`] under loose comparison.
    pub fn statistics(self) -> Statistics {
        Statistics::new(self.close())
    }

    /// Closes and computes [`Statistics`], sorting with `flags`.
    pub fn statistics_with(self, flags: SortFlags) -> Statistics {
        Statistics::with_flags(self.close(), flags)
    }

    /// Closes and computes [`Statistics`], sorting with `comparator`.
    pub fn statistics_by<F>(self, comparator: F) -> Statistics
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        Statistics::by(self.close(), comparator)
    }

    /// Closes and calls `action` with every value and key.
    pub fn each<F>(self, action: F)
    where
        F: FnMut(&Value, &Key),
    {
        traversable_walk(action, self.close());
    }

    /// Closes and tests `predicate` against every value.
    pub fn all_match<F>(self, predicate: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        all_match(predicate, self.close())
    }

    /// Closes and tests whether any value satisfies `predicate`.
    pub fn any_match<F>(self, predicate: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        any_match(predicate, self.close())
    }

    /// Closes and tests whether no value satisfies `predicate`.
    pub fn none_match<F>(self, predicate: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        none_match(predicate, self.close())
    }

    /// Closes and returns the number of elements.
    pub fn count(self) -> usize {
        self.close().len()
    }

    /// Closes and returns the number of elements, nested arrays included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use traverso::monad::Stream;
    /// use traverso::traversable;
    ///
    /// assert_eq!(Stream::of(traversable![1, traversable![2, traversable![3]]]).count_recursive(), 5);
    /// ```
    pub fn count_recursive(self) -> usize {
        count_nested(&self.close())
    }

    /// Closes and returns `true` if there are no elements.
    pub fn is_empty(self) -> bool {
        self.close().is_empty()
    }

    /// Closes and returns the collection.
    pub fn to_array(self) -> Traversable {
        self.close()
    }
}

fn saturating_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

fn count_nested(entries: &Traversable) -> usize {
    entries.len()
        + entries
            .values()
            .filter_map(Value::as_traversable)
            .map(count_nested)
            .sum::<usize>()
}

fn collect_callables(value: Value, callables: &mut Vec<Value>) -> Result<(), Error> {
    if value.is_callable() {
        callables.push(value);
        return Ok(());
    }
    match value {
        Value::Array(nested) => nested
            .into_values()
            .into_iter()
            .try_for_each(|value| collect_callables(value, callables)),
        other => Err(Error::invalid_argument(format!(
            "close handler must be callable, got {}",
            other.type_name()
        ))),
    }
}

impl Monad for Stream {
    type Inner = Traversable;

    fn create(value: Value) -> Self {
        Self {
            entries: to_array(value, false),
            close_handlers: SmallVec::new(),
        }
    }

    #[inline]
    fn get(&self) -> &Traversable {
        &self.entries
    }

    /// Closes the stream and returns its collection.
    fn extract(self) -> Traversable {
        self.close()
    }

    /// Replaces the collection with the normalized result of `mapper`
    /// without closing; close handlers are kept.
    fn map<F>(self, mapper: F) -> Self
    where
        F: FnOnce(Traversable) -> Value,
    {
        self.pipe(|entries| to_array(mapper(entries), false))
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Stream")
            .field("entries", &self.entries)
            .field("close_handlers", &self.close_handlers.len())
            .finish()
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Array")
    }
}

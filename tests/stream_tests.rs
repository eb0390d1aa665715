#![cfg(feature = "monad")]
//! Integration tests for `Stream` pipelines, closing operations and close
//! handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rstest::rstest;
use traverso::Error;
use traverso::monad::{Monad, Optional, Stream, stream};
use traverso::traversable;
use traverso::value::{Collection, Function, Key, SortFlags, Traversable, Value};

fn even(value: &Value, _: &Key) -> bool {
    value.as_i64().is_some_and(|number| number % 2 == 0)
}

fn times_ten(value: Value, _: &Key) -> Value {
    Value::Int(value.as_i64().unwrap_or(0) * 10)
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn round_trips_a_list() {
    assert_eq!(Stream::of(traversable![1, 2, 3]).to_array(), traversable![1, 2, 3]);
}

#[rstest]
#[case(Value::Null, 0)]
#[case(Value::from(""), 1)]
#[case(Value::from(traversable![1, 2]), 2)]
#[case(Collection::new(traversable!["a" => 1, "b" => 2, "c" => 3]).into_value(), 3)]
fn construction_normalizes_any_input(#[case] input: Value, #[case] expected: usize) {
    assert_eq!(stream(input).count(), expected);
}

// =============================================================================
// Stages
// =============================================================================

#[rstest]
fn filter_and_map_keep_keys() {
    let result = Stream::of(traversable![1, 2, 3, 4]).filter(even).map_each(times_ten).to_array();
    assert_eq!(result, traversable![1 => 20, 3 => 40]);
}

#[rstest]
fn filter_values_and_map_values_reindex() {
    let result = Stream::of(traversable![1, 2, 3, 4])
        .filter_values(even)
        .map_values(times_ten)
        .to_array();
    assert_eq!(result, traversable![20, 40]);
}

#[rstest]
fn limit_and_skip_window_the_elements() {
    let stream = || Stream::of(traversable![1, 2, 3, 4, 5]);
    assert_eq!(stream().skip(1).limit(2).to_array(), traversable![2, 3]);
    assert_eq!(stream().limit(0).to_array(), traversable![]);
    assert_eq!(stream().slice(-2, None, true).to_array(), traversable![3 => 4, 4 => 5]);
}

#[rstest]
fn distinct_keeps_first_occurrences() {
    let result = Stream::of(traversable![3, "3", 1, 3.0, 1]).distinct().to_array();
    assert_eq!(result, traversable![0 => 3, 2 => 1]);

    let strict = Stream::of(traversable!["a", "A", "b"]).distinct_with(SortFlags::StringCaseInsensitive);
    assert_eq!(strict.to_array(), traversable![0 => "a", 2 => "b"]);
}

#[rstest]
fn sort_reverse_and_merge() {
    let result = Stream::of(traversable![3, 1, 2])
        .sort(SortFlags::Regular)
        .reverse(false)
        .merge([traversable![9]])
        .to_array();
    assert_eq!(result, traversable![3, 2, 1, 9]);

    let by_length = Stream::of(traversable!["ccc", "a", "bb"])
        .sort_by(|left, right| left.to_string().len().cmp(&right.to_string().len()))
        .to_array();
    assert_eq!(by_length, traversable!["a", "bb", "ccc"]);
}

#[rstest]
fn seeded_randomize_keeps_the_elements() {
    let mut rng = StdRng::seed_from_u64(3);
    let shuffled = Stream::of(traversable![1, 2, 3, 4]).randomize_with(&mut rng).sort(SortFlags::Numeric);
    assert_eq!(shuffled.to_array(), traversable![1, 2, 3, 4]);
}

#[rstest]
fn map_replaces_the_collection_without_closing() {
    let closes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&closes);
    let stream = Stream::of(traversable![1, 2])
        .on_close(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .map(|entries| Value::from(entries.len()));
    assert_eq!(closes.load(Ordering::SeqCst), 0);
    assert_eq!(stream.get(), &traversable![2]);
    assert_eq!(stream.to_array(), traversable![2]);
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Closing Operations
// =============================================================================

#[rstest]
fn find_operations() {
    let stream = || Stream::of(traversable![5, 2, 8, 3]);
    assert_eq!(stream().find_first(), Optional::of(5));
    assert_eq!(stream().find_last(), Optional::of(3));
    assert_eq!(stream().find_first_by(even), Optional::of(2));
    assert_eq!(stream().find_last_by(even), Optional::of(8));
    assert_eq!(stream().find_min(), Optional::of(2));
    assert_eq!(stream().find_max(), Optional::of(8));
    assert_eq!(
        stream().find_max_by(|left, right| right.to_f64().total_cmp(&left.to_f64())),
        Optional::of(2)
    );
    assert!(stream().find_first_by(|_, _| false).is_absent());
}

#[rstest]
fn find_random_picks_a_member() {
    let mut rng = StdRng::seed_from_u64(11);
    let picked = Stream::of(traversable![5, 2, 8]).find_random_with(&mut rng).or_else(0);
    assert!([5, 2, 8].contains(&picked.as_i64().unwrap_or(0)));

    let only_even = Stream::of(traversable![1, 3, 4]).find_random_by(even);
    assert_eq!(only_even, Optional::of(4));
}

#[rstest]
#[case(traversable![], true, false, true)]
#[case(traversable![2, 4], true, true, false)]
#[case(traversable![1, 4], false, true, false)]
fn quantifiers(#[case] input: Traversable, #[case] all: bool, #[case] any: bool, #[case] none: bool) {
    let is_even = |value: &Value| even(value, &Key::Index(0));
    assert_eq!(Stream::of(input.clone()).all_match(is_even), all);
    assert_eq!(Stream::of(input.clone()).any_match(is_even), any);
    assert_eq!(Stream::of(input).none_match(is_even), none);
}

#[rstest]
fn sum_reduce_and_counts() {
    assert_eq!(Stream::of(traversable![1, 2, 3]).sum(), Optional::of(6));
    assert_eq!(Stream::of(traversable![1.5, "x"]).sum(), Optional::of(1.5));
    assert_eq!(
        Stream::of(traversable![1, 2, 3]).reduce(
            |accumulator, value, _| Value::Int(accumulator.as_i64().unwrap_or(0) * value.as_i64().unwrap_or(0)),
            1
        ),
        Optional::of(6)
    );
    assert!(Stream::empty().reduce(|accumulator, _, _| accumulator, Value::Null).is_absent());

    let nested = traversable![1, traversable![2, 3], traversable![traversable![4]]];
    assert_eq!(Stream::of(nested.clone()).count(), 3);
    assert_eq!(Stream::of(nested).count_recursive(), 7);
}

#[rstest]
fn statistics_through_the_stream() {
    let statistics = Stream::of(traversable![4, 1, 3, 2]).statistics();
    assert_eq!(statistics.count(), 4);
    assert_eq!(statistics.median_average(), 2.5);

    let by_string = Stream::of(traversable![10, 9]).statistics_with(SortFlags::String);
    assert_eq!(by_string.min(), 10.0);

    let reversed = Stream::of(traversable![1, 2, 3]).statistics_by(|left, right| right.to_f64().total_cmp(&left.to_f64()));
    assert_eq!(reversed.min(), 3.0);
}

#[rstest]
fn conditional_actions_receive_the_whole_collection() {
    let size = |entries: Traversable| Value::from(entries.len());
    let positive = |value: &Value| value.as_i64().is_some_and(|number| number > 0);
    assert_eq!(Stream::of(traversable![1, 2]).if_all_match(positive, size), Optional::of(2));
    assert!(Stream::of(traversable![1, -2]).if_all_match(positive, size).is_absent());
    assert_eq!(Stream::of(traversable![-1, 2, 3]).if_any_match(positive, size), Optional::of(3));
    assert_eq!(Stream::of(traversable![-1]).if_none_match(positive, size), Optional::of(1));
}

// =============================================================================
// Close Handlers
// =============================================================================

#[rstest]
fn handlers_fire_once_each_in_order_with_the_final_value() {
    let calls: Arc<Mutex<Vec<(u8, Traversable)>>> = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&calls);
    let second = Arc::clone(&calls);

    let total = Stream::of(traversable![1, 2, 3])
        .on_close(move |entries| first.lock().unwrap().push((1, entries.clone())))
        .on_close(move |entries| second.lock().unwrap().push((2, entries.clone())))
        .map_values(times_ten)
        .sum();

    assert_eq!(total, Optional::of(60));
    assert_eq!(
        *calls.lock().unwrap(),
        vec![(1, traversable![10, 20, 30]), (2, traversable![10, 20, 30])]
    );
}

#[rstest]
fn derived_streams_carry_copies_of_the_handlers() {
    let closes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&closes);
    let base = Stream::of(traversable![1, 2]).on_close(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let left = base.clone().filter(even);
    let right = base.limit(1);
    assert_eq!(closes.load(Ordering::SeqCst), 0);

    left.each(|_, _| {});
    right.is_empty();
    assert_eq!(closes.load(Ordering::SeqCst), 2);
}

#[rstest]
fn handlers_are_not_fired_without_a_closing_operation() {
    let closes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&closes);
    let _pipeline = Stream::of(traversable![1])
        .on_close(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .flatten(false)
        .flip();
    assert_eq!(closes.load(Ordering::SeqCst), 0);
}

#[rstest]
fn dynamic_handlers_receive_the_collection() {
    let received = Arc::new(Mutex::new(Value::Null));
    let sink = Arc::clone(&received);
    let handler = Function::unary(move |entries| {
        *sink.lock().unwrap() = entries.clone();
        entries
    });

    let count = Stream::of(traversable!["a"]).on_close_callables(handler).unwrap().count();
    assert_eq!(count, 1);
    assert_eq!(*received.lock().unwrap(), Value::from(traversable!["a"]));
}

#[rstest]
fn bound_methods_are_accepted_as_handlers() {
    let collection = Collection::new(traversable![]).into_value();
    let stream = Stream::of(traversable![1]).on_close_callables(traversable![traversable![collection, "count"]]);
    assert!(stream.is_ok());
}

#[rstest]
#[case(Value::Null)]
#[case(Value::from(1))]
#[case(Value::from(traversable![Function::unary(|value| value), "not callable"]))]
fn non_callable_handlers_are_rejected(#[case] handlers: Value) {
    let result = Stream::empty().on_close_callables(handlers);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

// =============================================================================
// Mixed-Type Ordering
// =============================================================================

fn mixed_input(rng: &mut StdRng, length: usize) -> Traversable {
    (0..length)
        .map(|_| match rng.random_range(0..6) {
            0 => Value::Bool(rng.random()),
            1 => Value::Int(rng.random_range(-5..5)),
            2 => Value::from(["a", "b", "10", "2"][rng.random_range(0..4)]),
            3 => Value::Null,
            4 => Value::Float(f64::NAN),
            _ => Value::Float(rng.random_range(-5.0..5.0)),
        })
        .collect()
}

#[rstest]
fn sorting_and_statistics_over_mixed_values_never_panic() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let input = mixed_input(&mut rng, 40);

        for flags in [SortFlags::Regular, SortFlags::Numeric, SortFlags::Natural] {
            assert_eq!(Stream::of(input.clone()).sort(flags).count(), 40);
            assert_eq!(Stream::of(input.clone()).statistics_with(flags).count(), 40);
        }
        assert!(Stream::of(input.clone()).distinct().count() <= 40);
        let _ = Stream::of(input.clone()).find_min();
        let _ = Stream::of(input).find_max();
    }
}

//! Benchmark for the traversal normalizer and transform primitives.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use traverso::convert::{to_array, traversable_flatten, traversable_merge, traversable_unique};
use traverso::value::{Collection, SortFlags, Traversable, Value};

fn nested(depth: usize, width: i64) -> Value {
    if depth == 0 {
        return (0..width).map(Value::Int).collect::<Traversable>().into();
    }
    (0..width)
        .map(|_| nested(depth - 1, width))
        .collect::<Traversable>()
        .into()
}

// =============================================================================
// Normalizer Benchmarks
// =============================================================================

fn benchmark_normalize(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("to_array");

    let array = Value::from((0..1_000).map(Value::Int).collect::<Traversable>());
    let object = Collection::new((0..1_000).map(Value::Int).collect()).into_value();

    group.bench_function("array", |bencher| {
        bencher.iter(|| black_box(to_array(array.clone(), false)));
    });
    group.bench_function("iterable_object", |bencher| {
        bencher.iter(|| black_box(to_array(object.clone(), false)));
    });
    group.bench_function("scalar", |bencher| {
        bencher.iter(|| black_box(to_array(Value::from("text"), true)));
    });

    group.finish();
}

// =============================================================================
// Primitive Benchmarks
// =============================================================================

fn benchmark_flatten(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("traversable_flatten");

    for depth in [1, 2, 3] {
        let input = nested(depth, 8);
        group.bench_with_input(BenchmarkId::new("depth", depth), &input, |bencher, input| {
            bencher.iter(|| black_box(traversable_flatten(input.clone(), false)));
        });
    }

    group.finish();
}

fn benchmark_merge_and_unique(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("merge_unique");

    for size in [100, 1_000, 10_000] {
        let halves: Vec<Traversable> = vec![
            (0..size).map(Value::Int).collect(),
            (size / 2..size + size / 2).map(Value::Int).collect(),
        ];

        group.bench_with_input(BenchmarkId::new("merge", size), &halves, |bencher, halves| {
            bencher.iter(|| black_box(traversable_merge(halves.iter().cloned())));
        });

        let merged = traversable_merge(halves);
        group.bench_with_input(BenchmarkId::new("unique", size), &merged, |bencher, merged| {
            bencher.iter(|| black_box(traversable_unique(merged.clone(), SortFlags::Regular)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_flatten, benchmark_merge_and_unique);
criterion_main!(benches);

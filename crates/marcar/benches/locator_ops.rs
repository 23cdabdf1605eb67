//! Locator Operations Benchmarks
//!
//! Benchmarks for child access, invocation, and the production fast path.
//!
//! Run with: `cargo bench --bench locator_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use marcar::{Locator, Parameters, RootOptions};

fn bench_child_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("child_access");

    group.bench_function("first_access", |bench| {
        bench.iter_batched(
            || Locator::root("root"),
            |root| black_box(root.child("child")),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cached_access", |bench| {
        let root = Locator::root("root");
        let _ = root.child("child");
        bench.iter(|| black_box(root.child("child")));
    });

    group.finish();
}

fn bench_invocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("invocation");

    for parameter_count in [0_usize, 1, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(parameter_count),
            &parameter_count,
            |bench, &count| {
                let node = Locator::root("root").child("child");
                let mut parameters = Parameters::new();
                for index in 0..count {
                    parameters.insert(format!("parameter{index}"), "value");
                }
                bench.iter(|| black_box(node.invoke_with(parameters.clone()).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_production_invocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("production_invocation");

    let root = Locator::root_with_options("root", RootOptions::new().with_production_pin(true));
    group.bench_function("pinned_root", |bench| {
        bench.iter(|| black_box(root.child("child").invoke().unwrap()));
    });

    group.finish();
}

fn bench_deep_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_paths");

    for depth in [1_usize, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bench, &depth| {
            let root = Locator::root("root");
            bench.iter(|| {
                let mut node = root.clone();
                for index in 0..depth {
                    node = node.child(format!("level{index}"));
                }
                black_box(node.as_string())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_child_access,
    bench_invocation,
    bench_production_invocation,
    bench_deep_paths
);
criterion_main!(benches);

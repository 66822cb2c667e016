//! Mutation and snapshot benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tenvis_matchtree_bench::{build_tree, random_patterns};
use tenvis_matchtree_core::MatchTree;

/// Benchmark inserting into an owned tree.
fn bench_insert(c: &mut Criterion) {
    let patterns = random_patterns(10_000, 5);

    let mut group = c.benchmark_group("insert");

    group.bench_function("owned", |b| {
        let mut tree = MatchTree::new();
        let mut i = 0usize;
        b.iter(|| {
            let pattern = &patterns[i % patterns.len()];
            tree.insert(black_box(pattern), i);
            i += 1;
        });
    });

    group.bench_function("build_10k", |b| {
        b.iter(|| build_tree(black_box(&patterns)));
    });

    group.finish();
}

/// Benchmark the cost of cloning and then diverging.
fn bench_snapshot(c: &mut Criterion) {
    let patterns = random_patterns(20_000, 5);
    let tree = build_tree(&patterns);

    let mut group = c.benchmark_group("snapshot");

    group.bench_function("clone", |b| b.iter(|| black_box(&tree).clone()));

    group.bench_function("clone_then_insert", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut clone| {
                clone.insert("1.2.3.4.5.6.7", usize::MAX);
                clone
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("clone_then_remove", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut clone| {
                clone.remove(&patterns[0], &0);
                clone
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_snapshot);
criterion_main!(benches);

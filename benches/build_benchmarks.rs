use balanced_bst::{BalancedBst, BinarySearchTree, BuildStrategy};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// Naive insertion of sorted keys is quadratic, so keep that comparison small.
const NAIVE_N: usize = 2_000;

// ─── Helper functions to generate batches ───────────────────────────────────

fn ordered_batch(n: usize) -> Vec<(i64, i64)> {
    (0..n as i64).map(|k| (k, k)).collect()
}

fn random_batch(n: usize) -> Vec<(i64, i64)> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut seen = BTreeMap::new();
    let mut x: u64 = 12345;
    while seen.len() < n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        let key = (x >> 33) as i64;
        seen.entry(key).or_insert(key);
    }
    let mut batch: Vec<_> = seen.into_iter().collect();
    // Scramble the order without losing uniqueness.
    batch.sort_by_key(|&(k, _)| k.wrapping_mul(0x9E37_79B9) & 0xFFFF_FFFF);
    batch
}

// ─── Construction ───────────────────────────────────────────────────────────

fn bench_build_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_ordered");
    let batch = ordered_batch(N);

    for strategy in [BuildStrategy::Recursive, BuildStrategy::WorkList] {
        group.bench_function(BenchmarkId::new(format!("BalancedBst/{strategy:?}"), N), |b| {
            b.iter(|| BalancedBst::build_with(black_box(batch.clone()), strategy).unwrap());
        });
    }

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| black_box(batch.clone()).into_iter().collect::<BTreeMap<_, _>>());
    });

    group.finish();
}

fn bench_build_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_random");
    let batch = random_batch(N);

    group.bench_function(BenchmarkId::new("BalancedBst", N), |b| {
        b.iter(|| BalancedBst::build(black_box(batch.clone())).unwrap());
    });

    group.bench_function(BenchmarkId::new("BinarySearchTree::insert", N), |b| {
        b.iter(|| {
            let mut tree = BinarySearchTree::with_capacity(N);
            for &(k, v) in black_box(&batch) {
                tree.insert(k, v).unwrap();
            }
            tree
        });
    });

    group.finish();
}

fn bench_balanced_vs_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_input");
    let batch = ordered_batch(NAIVE_N);

    group.bench_function(BenchmarkId::new("BalancedBst", NAIVE_N), |b| {
        b.iter(|| BalancedBst::build(black_box(batch.clone())).unwrap());
    });

    group.bench_function(BenchmarkId::new("BinarySearchTree::insert", NAIVE_N), |b| {
        b.iter(|| {
            let mut tree = BinarySearchTree::with_capacity(NAIVE_N);
            for &(k, v) in black_box(&batch) {
                tree.insert(k, v).unwrap();
            }
            tree
        });
    });

    group.finish();
}

// ─── Iteration ──────────────────────────────────────────────────────────────

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    let tree = BalancedBst::build(random_batch(N)).unwrap();
    let model: BTreeMap<_, _> = random_batch(N).into_iter().collect();

    group.bench_function(BenchmarkId::new("ReverseInOrder", N), |b| {
        b.iter(|| tree.iter().map(|node| *node.item()).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("Iter", N), |b| {
        b.iter(|| tree.as_tree().iter().map(|(_, v)| *v).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap::iter().rev()", N), |b| {
        b.iter(|| model.iter().rev().map(|(_, v)| *v).sum::<i64>());
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let batch = random_batch(N);
    let tree = BalancedBst::build(batch.clone()).unwrap();

    group.bench_function(BenchmarkId::new("BalancedBst::get", N), |b| {
        b.iter(|| {
            for (k, _) in &batch {
                black_box(tree.get(k));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_build_ordered,
    bench_build_random,
    bench_balanced_vs_sequential,
    bench_iterate,
    bench_lookup
);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rbst_tree::{Duplicates, Natural, RandomizedTree};
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for a deterministic pseudo-random sequence.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn seeded_tree(keys: &[i64]) -> RandomizedTree<i64, Natural, SmallRng> {
    let rng = SmallRng::seed_from_u64(99);
    let mut tree = RandomizedTree::with_rng(Natural, Duplicates::Reject, rng);
    tree.extend(keys.iter().copied());
    tree
}

// ─── Insertion benchmarks ───────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    let sequences = [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ];

    for (name, keys) in &sequences {
        let mut group = c.benchmark_group(format!("insert_{name}"));

        group.bench_function(BenchmarkId::new("RandomizedTree", N), |b| {
            b.iter(|| {
                let rng = SmallRng::seed_from_u64(99);
                let mut tree = RandomizedTree::with_rng(Natural, Duplicates::Reject, rng);
                for &key in keys {
                    tree.insert(key);
                }
                tree
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &key in keys {
                    set.insert(key);
                }
                set
            });
        });

        group.finish();
    }
}

// ─── Lookup benchmarks ──────────────────────────────────────────────────────

fn bench_contains(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree = seeded_tree(&keys);
    let set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("contains_random");

    group.bench_function(BenchmarkId::new("RandomizedTree", N), |b| {
        b.iter(|| keys.iter().filter(|key| tree.contains(key)).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter(|key| set.contains(key)).count());
    });

    group.finish();
}

// ─── Order-statistic benchmarks ─────────────────────────────────────────────

fn bench_rank_operations(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree = seeded_tree(&keys);
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let len = tree.len();

    let mut group = c.benchmark_group("get_by_rank");

    // The tree answers rank queries by descending the size augmentation; the
    // standard set has to walk the iterator.
    group.bench_function(BenchmarkId::new("RandomizedTree", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..len).step_by(97) {
                sum += tree.get_by_rank(rank).copied().unwrap_or_default();
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet::iter::nth", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..len).step_by(97) {
                sum += set.iter().nth(rank).copied().unwrap_or_default();
            }
            sum
        });
    });

    group.finish();
}

// ─── Deletion benchmarks ────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("RandomizedTree", N), |b| {
        b.iter_batched(
            || seeded_tree(&keys),
            |mut tree| {
                for key in &keys {
                    tree.remove(key);
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for key in &keys {
                    set.remove(key);
                }
                set
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_contains, bench_rank_operations, bench_remove);
criterion_main!(benches);

//! Criterion benchmarks for clr-engine critical operations.
//!
//! Covers: pairwise overlap (the O(projects × donors²) step), allocation,
//! and a full engine run at yocto-scale amounts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use clr_core::constants::YOCTO_PER_NEAR;
use clr_core::traits::MatchingCalculator;
use clr_core::types::Contribution;
use clr_core::{Amount, ClrConfig};
use clr_engine::{aggregate, allocate, pair_overlaps, ClrEngine};

/// Deterministic donation set: `projects` projects drawn from `donors` donors.
fn donations(projects: usize, donors: usize, count: usize) -> Vec<Contribution> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let p = rng.gen_range(0..projects);
            let d = rng.gen_range(0..donors);
            let amount = rng.gen_range(1..=100u128) * YOCTO_PER_NEAR / 10;
            Contribution::new(format!("project-{p}"), format!("donor-{d}.near"), amount)
        })
        .collect()
}

fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_overlaps");
    for donors in [10usize, 50, 200] {
        let index = aggregate(&donations(20, donors, donors * 10));
        group.bench_with_input(BenchmarkId::from_parameter(donors), &index, |b, index| {
            b.iter(|| pair_overlaps(black_box(index)))
        });
    }
    group.finish();
}

fn bench_allocate(c: &mut Criterion) {
    let index = aggregate(&donations(20, 100, 1_000));
    let overlaps = pair_overlaps(&index);
    let threshold = Amount::from(25 * YOCTO_PER_NEAR);

    c.bench_function("allocate", |b| {
        b.iter(|| allocate(black_box(&index), black_box(&overlaps), black_box(&threshold)))
    });
}

fn bench_full_run(c: &mut Criterion) {
    let input = donations(20, 100, 1_000);
    let engine = ClrEngine::new(ClrConfig::new(
        Amount::from(25 * YOCTO_PER_NEAR),
        Amount::from(5_000 * YOCTO_PER_NEAR),
    ))
    .expect("valid config");

    c.bench_function("compute_matching", |b| {
        b.iter(|| engine.compute_matching(black_box(&input)))
    });
}

criterion_group!(benches, bench_overlap, bench_allocate, bench_full_run);
criterion_main!(benches);

//! Criterion benches for end-to-end simplification on seeded random ledgers.
//!
//! - Partitional: racing vs single-direction schedules.
//! - Greedy and bisection on the same inputs for comparison.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use settlegraph::prelude::*;

fn ledger(len: usize, index: u64) -> Vec<i64> {
    let params = EquityGraphParams {
        len,
        ..EquityGraphParams::default()
    };
    draw_equity_graph(&params, ReplayToken { seed: 42, index }).unwrap()
}

fn bench_partitional(c: &mut Criterion) {
    let mut group = c.benchmark_group("partitional");
    group.sample_size(20);
    for (label, strategy) in [
        ("race", SearchStrategy::Race),
        ("ascending", SearchStrategy::AscendingOnly),
        ("descending", SearchStrategy::DescendingOnly),
    ] {
        let simplifier = PartitionalSimplifier::new(SearchCfg {
            strategy,
            ..SearchCfg::default()
        });
        group.bench_function(BenchmarkId::new(label, "len12"), |b| {
            b.iter_batched(
                || ledger(12, 3),
                |input| {
                    let _ = simplifier.simplify(&input).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_baselines(c: &mut Criterion) {
    let mut group = c.benchmark_group("baselines");
    group.sample_size(20);
    group.bench_function(BenchmarkId::new("greedy", "len16"), |b| {
        b.iter_batched(
            || ledger(16, 5),
            |input| {
                let _ = GreedySimplifier.simplify(&input).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("bisection", "len10"), |b| {
        b.iter_batched(
            || ledger(10, 5),
            |input| {
                let _ = BisectionSimplifier.simplify(&input).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_partitional, bench_baselines);
criterion_main!(benches);

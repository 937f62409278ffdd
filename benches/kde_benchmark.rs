//! Benchmarks for kernel density estimation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use genint::{EpanechnikovKernel, EvaluationGrid, GroupedSamples, Kernel, KernelDensityEstimator};

/// Deterministic pseudo-random sample in [0, 50)
fn make_sample(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64 * 50.0
        })
        .collect()
}

fn bench_kernel_weight(c: &mut Criterion) {
    let kernel = EpanechnikovKernel::new(2.0).unwrap();
    c.bench_function("epanechnikov_weight", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for i in -200..200 {
                total += kernel.weight(black_box(i as f64 * 0.01));
            }
            total
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("kde_evaluate");
    let grid = EvaluationGrid::linspace(0.0, 50.0, 512).unwrap();
    let kde = KernelDensityEstimator::new(EpanechnikovKernel::new(1.5).unwrap(), grid);

    for n in [100, 1_000, 10_000] {
        let sample = make_sample(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &sample, |b, sample| {
            b.iter(|| kde.evaluate(black_box(sample)))
        });
    }

    group.finish();
}

fn bench_evaluate_groups(c: &mut Criterion) {
    let grid = EvaluationGrid::linspace(0.0, 50.0, 256).unwrap();
    let kde = KernelDensityEstimator::new(EpanechnikovKernel::new(1.5).unwrap(), grid);

    let mut samples = GroupedSamples::new();
    for (i, name) in ["AFR", "AMR", "EAS", "EUR", "SAS"].iter().enumerate() {
        samples.insert(*name, make_sample(2_000, i as u64 + 1));
    }

    c.bench_function("kde_evaluate_groups", |b| {
        b.iter(|| kde.evaluate_groups(black_box(&samples)))
    });
}

criterion_group!(benches, bench_kernel_weight, bench_evaluate, bench_evaluate_groups);
criterion_main!(benches);

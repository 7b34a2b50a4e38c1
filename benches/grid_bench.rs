use criterion::{criterion_group, criterion_main, Criterion};
use pillarforge::column::{CandidateSection, LoadVector};
use pillarforge::config::FixedParameters;
use pillarforge::features::{compute_features, FeatureVector};
use pillarforge::optimizer::{evaluate_candidate, NoProgress, OptimizationOptions, Optimizer};
use pillarforge::oracle::snapshot::LinearModel;
use pillarforge::oracle::{FeasibilityOracle, LinearSnapshot, OracleOutput};
use std::hint::black_box;

struct Threshold;

impl FeasibilityOracle for Threshold {
    fn version(&self) -> &str {
        "bench"
    }

    fn predict(&self, f: &FeatureVector) -> OracleOutput {
        OracleOutput {
            probability: if f.nu < 0.6 { 0.9 } else { 0.1 },
            steel_area: 0.015 * f.section.gross_area(),
        }
    }
}

fn setup_snapshot() -> LinearSnapshot {
    LinearSnapshot::new(
        "bench-linear",
        LinearModel {
            intercept: 4.0,
            weights: vec![-8.0, -1.0, -1.0, -0.01, -0.001, -0.2],
        },
        LinearModel {
            intercept: 0.01,
            weights: vec![0.02, 0.01, 0.01, 0.0, 0.0, 0.0],
        },
    )
    .expect("Failed to build snapshot")
}

fn random_loads(n: usize) -> Vec<LoadVector> {
    let mut rng = fastrand::Rng::with_seed(42);
    (0..n)
        .map(|_| {
            LoadVector::new(
                200.0 + rng.f64() * 3000.0,
                rng.f64() * 150.0,
                rng.f64() * 80.0,
                2.5 + rng.f64() * 3.0,
            )
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let params = FixedParameters::default();
    let loads = random_loads(64);
    let snapshot = setup_snapshot();

    c.bench_function("compute_features", |b| {
        let section = CandidateSection::new(30.0, 45.0);
        let mut i = 0;
        b.iter(|| {
            let load = &loads[i % loads.len()];
            i += 1;
            compute_features(black_box(load), black_box(&section), 30.0)
        })
    });

    c.bench_function("evaluate_candidate_snapshot", |b| {
        let section = CandidateSection::new(35.0, 35.0);
        let mut i = 0;
        b.iter(|| {
            let load = &loads[i % loads.len()];
            i += 1;
            evaluate_candidate(black_box(load), &section, &params, &snapshot)
        })
    });

    let mut group = c.benchmark_group("grid_search");
    for threads in [1, 4] {
        let optimizer = Optimizer::new(
            Threshold,
            OptimizationOptions::builder().num_threads(threads).build(),
        );
        group.bench_function(format!("default_grid_{}t", threads), |b| {
            let mut i = 0;
            b.iter(|| {
                let load = &loads[i % loads.len()];
                i += 1;
                optimizer
                    .run(black_box(load), &params, NoProgress)
                    .expect("search failed")
            })
        });
    }

    let mut fine = FixedParameters::default();
    fine.bounds.width_step = 1.0;
    fine.bounds.height_step = 1.0;
    let optimizer = Optimizer::new(&snapshot, OptimizationOptions::default());
    group.bench_function("fine_grid_snapshot", |b| {
        b.iter(|| {
            optimizer
                .run(black_box(&loads[0]), &fine, NoProgress)
                .expect("search failed")
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

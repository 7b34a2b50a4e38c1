mod common;

use common::PhysicsStub;
use pillarforge::column::LoadVector;
use pillarforge::config::FixedParameters;
use pillarforge::export;
use pillarforge::optimizer::{NoProgress, OptimizationOptions, Optimizer};

fn ranked_csv(threads: usize, batch_size: usize) -> String {
    let load = LoadVector::new(800.0, 50.0, 20.0, 3.0);
    let params = FixedParameters::default();
    let options = OptimizationOptions::builder()
        .num_threads(threads)
        .batch_size(batch_size)
        .build();

    let report = Optimizer::new(PhysicsStub::new(1.0), options)
        .run(&load, &params, NoProgress)
        .unwrap();

    let mut buf = Vec::new();
    export::write_csv(&mut buf, report.candidates()).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_identical_runs_are_byte_identical() {
    let a = ranked_csv(4, 64);
    let b = ranked_csv(4, 64);
    assert!(!a.is_empty());
    assert_eq!(a, b, "Determinism check failed: rankings differ");
}

#[test]
fn test_ranking_independent_of_parallelism() {
    let serial = ranked_csv(1, 81);
    for (threads, batch) in [(2, 7), (4, 16), (8, 1)] {
        assert_eq!(
            serial,
            ranked_csv(threads, batch),
            "ranking changed with {} threads / batch {}",
            threads,
            batch
        );
    }
}

#[test]
fn test_report_json_is_reproducible() {
    let load = LoadVector::new(1200.0, 80.0, 0.0, 4.0);
    let params = FixedParameters::default();
    let run = || {
        let report = Optimizer::new(PhysicsStub::new(0.9), OptimizationOptions::default())
            .run(&load, &params, NoProgress)
            .unwrap();
        serde_json::to_string(&report).unwrap()
    };
    assert_eq!(run(), run());
}

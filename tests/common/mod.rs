#![allow(dead_code)]

use pillarforge::features::FeatureVector;
use pillarforge::oracle::{FeasibilityOracle, OracleOutput};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Approves while ν stays under a crushing limit and sizes steel as
/// ρ = 1% + 2%·ν of the gross area.
pub struct PhysicsStub {
    pub nu_limit: f64,
}

impl PhysicsStub {
    pub fn new(nu_limit: f64) -> Self {
        Self { nu_limit }
    }
}

impl FeasibilityOracle for PhysicsStub {
    fn version(&self) -> &str {
        "physics-stub"
    }

    fn predict(&self, f: &FeatureVector) -> OracleOutput {
        let probability = if f.nu < self.nu_limit { 0.95 } else { 0.05 };
        OracleOutput {
            probability,
            steel_area: (0.01 + 0.02 * f.nu) * f.section.gross_area(),
        }
    }
}

/// Rejects every section.
pub struct RejectAll;

impl FeasibilityOracle for RejectAll {
    fn version(&self) -> &str {
        "reject-all"
    }

    fn predict(&self, _f: &FeatureVector) -> OracleOutput {
        OracleOutput {
            probability: 0.0,
            steel_area: 0.0,
        }
    }
}

/// Returns the same response for every section.
pub struct ConstantOracle(pub OracleOutput);

impl ConstantOracle {
    pub fn approving(steel_area: f64) -> Self {
        Self(OracleOutput {
            probability: 0.9,
            steel_area,
        })
    }
}

impl FeasibilityOracle for ConstantOracle {
    fn version(&self) -> &str {
        "constant"
    }

    fn predict(&self, _f: &FeatureVector) -> OracleOutput {
        self.0
    }
}

/// Confident approval with a NaN steel area.
pub struct GarbageOracle;

impl FeasibilityOracle for GarbageOracle {
    fn version(&self) -> &str {
        "garbage"
    }

    fn predict(&self, _f: &FeatureVector) -> OracleOutput {
        OracleOutput {
            probability: 0.99,
            steel_area: f64::NAN,
        }
    }
}

/// Wraps another oracle and counts calls.
pub struct CountingOracle<O> {
    pub inner: O,
    pub calls: AtomicUsize,
}

impl<O> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<O: FeasibilityOracle> FeasibilityOracle for CountingOracle<O> {
    fn version(&self) -> &str {
        self.inner.version()
    }

    fn predict(&self, f: &FeatureVector) -> OracleOutput {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.predict(f)
    }
}

pub const SNAPSHOT_JSON: &str = r#"{
    "version": "test-linear-v1",
    "classifier": { "intercept": 4.0, "weights": [-8.0, 0.0, 0.0, 0.0, 0.0, 0.0] },
    "regressor": { "intercept": 0.01, "weights": [0.02, 0.0, 0.0, 0.0, 0.0, 0.0] }
}"#;

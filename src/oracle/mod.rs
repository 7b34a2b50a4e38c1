pub mod snapshot;

pub use self::snapshot::LinearSnapshot;

use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use tracing::warn;

/// Learned feasibility classifier + steel-area regressor.
///
/// Implementations must be deterministic for a given `FeatureVector` and
/// safe to call concurrently from the search workers.
pub trait FeasibilityOracle: Send + Sync {
    /// Identifies the model snapshot the results were produced against.
    fn version(&self) -> &str;

    fn predict(&self, features: &FeatureVector) -> OracleOutput;
}

impl<T: FeasibilityOracle + ?Sized> FeasibilityOracle for &T {
    fn version(&self) -> &str {
        (**self).version()
    }

    fn predict(&self, features: &FeatureVector) -> OracleOutput {
        (**self).predict(features)
    }
}

impl<T: FeasibilityOracle + ?Sized> FeasibilityOracle for Arc<T> {
    fn version(&self) -> &str {
        (**self).version()
    }

    fn predict(&self, features: &FeatureVector) -> OracleOutput {
        (**self).predict(features)
    }
}

impl<T: FeasibilityOracle + ?Sized> FeasibilityOracle for Box<T> {
    fn version(&self) -> &str {
        (**self).version()
    }

    fn predict(&self, features: &FeatureVector) -> OracleOutput {
        (**self).predict(features)
    }
}

/// Raw, unvalidated oracle response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OracleOutput {
    pub probability: f64,
    /// Predicted longitudinal steel area (cm²)
    pub steel_area: f64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum FeasibilityStatus {
    Feasible,
    Infeasible,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum PredictionDefect {
    ProbabilityOutOfRange,
    NonFiniteSteel,
    NegativeSteel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub probability: f64,
    pub status: FeasibilityStatus,
    /// cm²
    pub steel_area: f64,
    /// Status and area were forced by the safety override.
    pub overridden: bool,
    /// Area was raised to the code minimum.
    pub floored: bool,
    pub defect: Option<PredictionDefect>,
}

impl Prediction {
    /// Validates a raw response. Defective responses become `Infeasible`
    /// with zero steel and stay eligible for the safety override.
    pub fn from_oracle(raw: OracleOutput, threshold: f64) -> Self {
        let defect = check_output(&raw);

        if let Some(d) = defect {
            warn!(
                "Malformed oracle prediction ({}): p={}, As={}",
                d, raw.probability, raw.steel_area
            );
            let probability = if d == PredictionDefect::ProbabilityOutOfRange {
                0.0
            } else {
                raw.probability
            };
            return Self {
                probability,
                status: FeasibilityStatus::Infeasible,
                steel_area: 0.0,
                overridden: false,
                floored: false,
                defect: Some(d),
            };
        }

        let status = if raw.probability >= threshold {
            FeasibilityStatus::Feasible
        } else {
            FeasibilityStatus::Infeasible
        };
        // A rejected section carries no sizing; mirrors the two-stage pipeline.
        let steel_area = match status {
            FeasibilityStatus::Feasible => raw.steel_area,
            FeasibilityStatus::Infeasible => 0.0,
        };

        Self {
            probability: raw.probability,
            status,
            steel_area,
            overridden: false,
            floored: false,
            defect: None,
        }
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.status == FeasibilityStatus::Feasible
    }
}

fn check_output(raw: &OracleOutput) -> Option<PredictionDefect> {
    let p = raw.probability;
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Some(PredictionDefect::ProbabilityOutOfRange);
    }
    if !raw.steel_area.is_finite() {
        return Some(PredictionDefect::NonFiniteSteel);
    }
    if raw.steel_area < 0.0 {
        return Some(PredictionDefect::NegativeSteel);
    }
    None
}

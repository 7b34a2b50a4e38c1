use super::{FeasibilityOracle, OracleOutput};
use crate::error::{PfResult, PillarError};
use crate::features::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearModel {
    #[inline]
    fn eval(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(x.iter())
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }
}

/// Exported model snapshot: a logistic feasibility classifier plus a
/// linear regressor on the reinforcement ratio ρ = As / Ac.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSnapshot {
    pub version: String,
    pub classifier: LinearModel,
    pub regressor: LinearModel,
    #[serde(skip)]
    fingerprint: String,
}

impl LinearSnapshot {
    pub fn new(version: &str, classifier: LinearModel, regressor: LinearModel) -> PfResult<Self> {
        let mut snapshot = Self {
            version: version.to_string(),
            classifier,
            regressor,
            fingerprint: String::new(),
        };
        snapshot.check_shape("<memory>")?;
        let bytes = serde_json::to_vec(&snapshot)?;
        snapshot.fingerprint = fingerprint_bytes(&bytes);
        Ok(snapshot)
    }

    /// Loads a snapshot. When `expected_sha256` is given the file bytes must
    /// hash to it, otherwise the oracle is treated as unavailable.
    pub fn load_from_file<P: AsRef<Path>>(path: P, expected_sha256: Option<&str>) -> PfResult<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let unavailable = |reason: String| PillarError::OracleUnavailable {
            path: label.clone(),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| unavailable(e.to_string()))?;
        let fingerprint = fingerprint_bytes(&bytes);

        if let Some(expected) = expected_sha256 {
            if !expected.eq_ignore_ascii_case(&fingerprint) {
                return Err(unavailable(format!(
                    "fingerprint mismatch: expected {}, found {}",
                    expected, fingerprint
                )));
            }
        }

        let mut snapshot: LinearSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| unavailable(e.to_string()))?;
        snapshot.check_shape(&label)?;
        snapshot.fingerprint = fingerprint;

        info!(
            "Loaded oracle snapshot '{}' (sha256 {})",
            snapshot.version, snapshot.fingerprint
        );
        Ok(snapshot)
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    fn check_shape(&self, label: &str) -> PfResult<()> {
        for (name, model) in [("classifier", &self.classifier), ("regressor", &self.regressor)] {
            if model.weights.len() != FEATURE_COUNT {
                return Err(PillarError::OracleUnavailable {
                    path: label.to_string(),
                    reason: format!(
                        "{} expects {} weights, found {}",
                        name,
                        FEATURE_COUNT,
                        model.weights.len()
                    ),
                });
            }
        }
        Ok(())
    }
}

impl FeasibilityOracle for LinearSnapshot {
    fn version(&self) -> &str {
        &self.version
    }

    fn predict(&self, features: &FeatureVector) -> OracleOutput {
        let x = features.as_array();
        let logit = self.classifier.eval(&x);
        let probability = 1.0 / (1.0 + (-logit).exp());
        let rho = self.regressor.eval(&x);

        OracleOutput {
            probability,
            steel_area: rho * features.section.gross_area(),
        }
    }
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

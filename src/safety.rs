//! Rule layer on top of the oracle.
//!
//! The override only ever approves: an oracle `Feasible` is never turned
//! into `Infeasible`, regardless of ν.

use crate::column::CandidateSection;
use crate::config::DesignRules;
use crate::features::FeatureVector;
use crate::oracle::{FeasibilityStatus, Prediction};
use tracing::debug;

/// Code-minimum longitudinal steel for a section (cm²).
#[inline]
pub fn minimum_steel_area(section: &CandidateSection, min_steel_ratio: f64) -> f64 {
    min_steel_ratio * section.gross_area()
}

/// Re-approves lightly loaded sections the oracle rejected.
///
/// Fires only for `Infeasible` predictions with ν strictly below the
/// threshold; reapplying it to its own output is a no-op. Returns whether
/// the prediction was changed.
pub fn apply_override(
    prediction: &mut Prediction,
    features: &FeatureVector,
    rules: &DesignRules,
) -> bool {
    if prediction.status != FeasibilityStatus::Infeasible {
        return false;
    }
    if features.nu >= rules.override_threshold {
        return false;
    }

    let as_min = minimum_steel_area(&features.section, rules.min_steel_ratio);
    debug!(
        "Override {}x{}: nu={:.3} < {:.3}, As -> {:.2} cm²",
        features.section.width,
        features.section.height,
        features.nu,
        rules.override_threshold,
        as_min
    );

    prediction.status = FeasibilityStatus::Feasible;
    prediction.steel_area = as_min;
    prediction.overridden = true;
    true
}

/// Raises an oracle-approved area that falls under the code minimum.
pub fn enforce_minimum_steel(
    prediction: &mut Prediction,
    section: &CandidateSection,
    rules: &DesignRules,
) -> bool {
    if !rules.enforce_minimum_steel || !prediction.is_feasible() {
        return false;
    }
    let as_min = minimum_steel_area(section, rules.min_steel_ratio);
    if prediction.steel_area < as_min {
        prediction.steel_area = as_min;
        prediction.floored = true;
        return true;
    }
    false
}

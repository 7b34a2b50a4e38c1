pub mod grid;
pub mod runner;

pub use self::runner::{
    optimize, NoProgress, OptimizationOptions, OptimizationReport, Optimizer, ProgressCallback,
    SearchOutcome, SearchStats,
};

use crate::column::{CandidateSection, LoadVector};
use crate::config::FixedParameters;
use crate::cost::{compute_cost, CostBreakdown};
use crate::features::{compute_features, FeatureVector};
use crate::oracle::{FeasibilityOracle, OracleOutput, Prediction};
use crate::safety;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A priced, approved grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluatedCandidate {
    pub section: CandidateSection,
    pub features: FeatureVector,
    pub prediction: Prediction,
    pub cost: CostBreakdown,
}

/// Outcome of running one section through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateVerdict {
    Accepted(EvaluatedCandidate),
    /// Still infeasible after the override; excluded from ranking.
    Rejected {
        features: FeatureVector,
        prediction: Prediction,
    },
}

impl CandidateVerdict {
    pub fn prediction(&self) -> &Prediction {
        match self {
            Self::Accepted(c) => &c.prediction,
            Self::Rejected { prediction, .. } => prediction,
        }
    }
}

/// Full diagnosis of one section, including the raw oracle response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateTrace {
    pub raw: OracleOutput,
    pub verdict: CandidateVerdict,
}

/// features -> oracle -> validation -> override -> minimum floor -> cost.
pub fn evaluate_candidate<O: FeasibilityOracle + ?Sized>(
    load: &LoadVector,
    section: &CandidateSection,
    params: &FixedParameters,
    oracle: &O,
) -> CandidateVerdict {
    trace_candidate(load, section, params, oracle).verdict
}

pub fn trace_candidate<O: FeasibilityOracle + ?Sized>(
    load: &LoadVector,
    section: &CandidateSection,
    params: &FixedParameters,
    oracle: &O,
) -> CandidateTrace {
    let rules = &params.rules;
    let features = compute_features(load, section, params.material.fck);

    let raw = oracle.predict(&features);
    let mut prediction = Prediction::from_oracle(raw, rules.feasibility_threshold);

    safety::apply_override(&mut prediction, &features, rules);
    safety::enforce_minimum_steel(&mut prediction, section, rules);

    let verdict = if prediction.is_feasible() && prediction.steel_area > 0.0 {
        let cost = compute_cost(section, prediction.steel_area, load.length, &params.costs);
        CandidateVerdict::Accepted(EvaluatedCandidate {
            section: *section,
            features,
            prediction,
            cost,
        })
    } else {
        debug!(
            "Rejected {}x{}: p={:.3}, nu={:.3}",
            section.width, section.height, prediction.probability, features.nu
        );
        CandidateVerdict::Rejected {
            features,
            prediction,
        }
    };

    CandidateTrace { raw, verdict }
}

/// Cheapest first; ties go to the more compact section, then to the
/// narrower one, so that the order is total.
pub fn rank_order(a: &EvaluatedCandidate, b: &EvaluatedCandidate) -> Ordering {
    a.cost
        .total_cost
        .total_cmp(&b.cost.total_cost)
        .then_with(|| a.section.gross_area().total_cmp(&b.section.gross_area()))
        .then_with(|| a.section.width.total_cmp(&b.section.width))
        .then_with(|| a.section.height.total_cmp(&b.section.height))
}

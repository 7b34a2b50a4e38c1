use super::{evaluate_candidate, grid, rank_order, CandidateVerdict, EvaluatedCandidate};
use crate::column::{CandidateSection, LoadVector};
use crate::config::FixedParameters;
use crate::error::{invalid, PfResult};
use crate::oracle::FeasibilityOracle;
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[derive(TypedBuilder, Debug, Clone)]
pub struct OptimizationOptions {
    #[builder(default = default_threads())]
    pub num_threads: usize,
    /// Candidates evaluated between two budget/abort checks.
    #[builder(default = 64)]
    pub batch_size: usize,
    #[builder(default, setter(strip_option))]
    pub max_time: Option<Duration>,
    /// Keep only the best K entries of the ranking.
    #[builder(default, setter(strip_option))]
    pub top_k: Option<usize>,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl OptimizationOptions {
    fn validate(&self) -> PfResult<()> {
        if self.num_threads == 0 {
            return Err(invalid("num_threads must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(invalid("batch_size must be at least 1"));
        }
        if self.top_k == Some(0) {
            return Err(invalid("top_k must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub generated: usize,
    pub aspect_rejected: usize,
    pub evaluated: usize,
    pub infeasible_rejected: usize,
    pub overridden: usize,
    pub floored: usize,
    pub malformed: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SearchOutcome {
    /// Ranked best-cost first; never empty.
    Optimum(Vec<EvaluatedCandidate>),
    NoFeasibleSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    pub oracle_version: String,
    /// The time budget or the progress callback stopped the search early.
    pub truncated: bool,
}

impl OptimizationReport {
    /// The recommendation: the cheapest surviving section.
    pub fn best(&self) -> Option<&EvaluatedCandidate> {
        self.candidates().first()
    }

    pub fn candidates(&self) -> &[EvaluatedCandidate] {
        match &self.outcome {
            SearchOutcome::Optimum(list) => list,
            SearchOutcome::NoFeasibleSection => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.outcome, SearchOutcome::NoFeasibleSection)
    }
}

/// Receives updates between batches.
/// Returning false stops the search before the next batch.
pub trait ProgressCallback: Send + Sync {
    fn on_batch(&self, evaluated: usize, total: usize, best_cost: Option<f64>) -> bool;
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_batch(&self, _evaluated: usize, _total: usize, _best_cost: Option<f64>) -> bool {
        true
    }
}

pub struct Optimizer<O: FeasibilityOracle> {
    oracle: O,
    options: OptimizationOptions,
}

impl<O: FeasibilityOracle> Optimizer<O> {
    pub fn new(oracle: O, options: OptimizationOptions) -> Self {
        Self { oracle, options }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        load: &LoadVector,
        params: &FixedParameters,
        callback: CB,
    ) -> PfResult<OptimizationReport> {
        let opts = &self.options;

        // 1. Global validation; nothing is generated on failure
        load.validate()?;
        params.validate()?;
        opts.validate()?;

        let start_time = Instant::now();
        info!(
            "Grid search: N={} kN, Mx={} kN·m, My={} kN·m, L={} m, oracle '{}'",
            load.axial,
            load.moment_x,
            load.moment_y,
            load.length,
            self.oracle.version()
        );

        // 2. Candidate space + aspect pre-filter
        let all = grid::enumerate(&params.bounds)?;
        let mut stats = SearchStats {
            generated: all.len(),
            ..Default::default()
        };
        let admissible: Vec<CandidateSection> = all
            .into_iter()
            .filter(|s| grid::within_aspect_limits(s, &params.bounds))
            .collect();
        stats.aspect_rejected = stats.generated - admissible.len();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.num_threads)
            .build()?;

        // 3. Fan-out per batch, fan-in on this thread
        let mut results: Vec<EvaluatedCandidate> = Vec::new();
        let mut best_cost: Option<f64> = None;
        let mut truncated = false;

        for (batch_idx, batch) in admissible.chunks(opts.batch_size).enumerate() {
            if batch_idx > 0 {
                if let Some(limit) = opts.max_time {
                    if start_time.elapsed() >= limit {
                        warn!(
                            "Time budget of {:?} exhausted after {} candidates",
                            limit, stats.evaluated
                        );
                        truncated = true;
                        break;
                    }
                }
            }

            let verdicts: Vec<CandidateVerdict> = pool.install(|| {
                batch
                    .par_iter()
                    .map(|s| evaluate_candidate(load, s, params, &self.oracle))
                    .collect()
            });

            for verdict in verdicts {
                stats.evaluated += 1;
                let p = verdict.prediction();
                if p.defect.is_some() {
                    stats.malformed += 1;
                }
                if p.overridden {
                    stats.overridden += 1;
                }
                if p.floored {
                    stats.floored += 1;
                }
                match verdict {
                    CandidateVerdict::Accepted(c) => {
                        let total = c.cost.total_cost;
                        if best_cost.map_or(true, |b| total < b) {
                            best_cost = Some(total);
                        }
                        results.push(c);
                    }
                    CandidateVerdict::Rejected { .. } => stats.infeasible_rejected += 1,
                }
            }

            if !callback.on_batch(stats.evaluated, admissible.len(), best_cost) {
                truncated = stats.evaluated < admissible.len();
                break;
            }
        }

        // 4. Rank
        results.sort_by(rank_order);
        if let Some(k) = opts.top_k {
            results.truncate(k);
        }
        stats.elapsed = start_time.elapsed();

        info!(
            "Search finished in {:.2?}: {} generated, {} aspect-rejected, {} evaluated, {} feasible ({} overridden, {} floored, {} malformed)",
            stats.elapsed,
            stats.generated,
            stats.aspect_rejected,
            stats.evaluated,
            stats.evaluated - stats.infeasible_rejected,
            stats.overridden,
            stats.floored,
            stats.malformed
        );

        let outcome = if results.is_empty() {
            SearchOutcome::NoFeasibleSection
        } else {
            SearchOutcome::Optimum(results)
        };

        Ok(OptimizationReport {
            outcome,
            stats,
            oracle_version: self.oracle.version().to_string(),
            truncated,
        })
    }
}

/// Exhaustive search with default options.
pub fn optimize<O: FeasibilityOracle>(
    load: &LoadVector,
    params: &FixedParameters,
    oracle: O,
) -> PfResult<OptimizationReport> {
    Optimizer::new(oracle, OptimizationOptions::default()).run(load, params, NoProgress)
}

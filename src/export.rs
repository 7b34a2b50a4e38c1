use crate::error::PfResult;
use crate::optimizer::EvaluatedCandidate;
use serde::Serialize;
use std::io::Write;

/// One line of the ranked table, as written to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub width: f64,
    pub height: f64,
    pub status: String,
    pub probability: f64,
    pub steel_area: f64,
    pub nu: f64,
    pub concrete_cost: f64,
    pub steel_cost: f64,
    pub total_cost: f64,
    pub overridden: bool,
    pub floored: bool,
}

impl RankingRow {
    pub fn from_candidate(rank: usize, c: &EvaluatedCandidate) -> Self {
        Self {
            rank,
            width: c.section.width,
            height: c.section.height,
            status: c.prediction.status.to_string(),
            probability: c.prediction.probability,
            steel_area: c.prediction.steel_area,
            nu: c.features.nu,
            concrete_cost: c.cost.concrete_cost,
            steel_cost: c.cost.steel_cost,
            total_cost: c.cost.total_cost,
            overridden: c.prediction.overridden,
            floored: c.prediction.floored,
        }
    }
}

pub fn ranking_rows(candidates: &[EvaluatedCandidate]) -> Vec<RankingRow> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| RankingRow::from_candidate(i + 1, c))
        .collect()
}

/// Writes the ranking with a header row. Ranks start at 1.
pub fn write_csv<W: Write>(writer: W, candidates: &[EvaluatedCandidate]) -> PfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in ranking_rows(candidates) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

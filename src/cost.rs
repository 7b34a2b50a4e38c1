use crate::column::CandidateSection;
use crate::config::CostRates;
use serde::{Deserialize, Serialize};

/// kg of steel per cm² of bar area per metre of length (7850 kg/m³ · 1e-4 m²).
pub const STEEL_LINEAR_DENSITY: f64 = 0.785;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub concrete_volume: f64,
    pub steel_weight: f64,
    pub concrete_cost: f64,
    pub steel_cost: f64,
    pub total_cost: f64,
}

/// Prices one candidate. `steel_area` in cm², `length` in m.
///
/// The optimizer only calls this with a finite, positive area.
pub fn compute_cost(
    section: &CandidateSection,
    steel_area: f64,
    length: f64,
    rates: &CostRates,
) -> CostBreakdown {
    let concrete_volume = (section.width / 100.0) * (section.height / 100.0) * length;
    let concrete_cost = concrete_volume * rates.concrete_price_m3;

    let steel_weight = steel_area * length * STEEL_LINEAR_DENSITY;
    let steel_cost = steel_weight * rates.steel_price_kg;

    CostBreakdown {
        concrete_volume,
        steel_weight,
        concrete_cost,
        steel_cost,
        total_cost: concrete_cost + steel_cost,
    }
}

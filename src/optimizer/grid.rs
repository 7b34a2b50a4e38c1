use crate::column::CandidateSection;
use crate::config::SearchBounds;
use crate::error::{invalid, PfResult};

/// Upper bound on the cross product; a finer grid is a configuration error.
pub const MAX_CANDIDATES: usize = 1_000_000;

/// Values `min, min + step, ...` not exceeding `max` (inclusive).
pub fn axis_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    (0..axis_len(min, max, step))
        .map(|i| round_micro(min + i as f64 * step))
        .collect()
}

fn axis_len(min: f64, max: f64, step: f64) -> usize {
    // Tolerance keeps `max` when (max - min) / step lands just under an integer
    (((max - min) / step + 1e-9).floor() as usize).saturating_add(1)
}

#[inline]
fn round_micro(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// Full width × height cross product, width-major.
pub fn enumerate(bounds: &SearchBounds) -> PfResult<Vec<CandidateSection>> {
    let total = axis_len(bounds.width_min, bounds.width_max, bounds.width_step)
        .saturating_mul(axis_len(bounds.height_min, bounds.height_max, bounds.height_step));
    if total > MAX_CANDIDATES {
        return Err(invalid(format!(
            "search grid has {} candidates, limit is {}",
            total, MAX_CANDIDATES
        )));
    }

    let widths = axis_values(bounds.width_min, bounds.width_max, bounds.width_step);
    let heights = axis_values(bounds.height_min, bounds.height_max, bounds.height_step);

    let mut out = Vec::with_capacity(total);
    for &w in &widths {
        for &h in &heights {
            out.push(CandidateSection::new(w, h));
        }
    }
    Ok(out)
}

/// Cheap geometric pre-filter applied before the oracle is consulted.
#[inline]
pub fn within_aspect_limits(section: &CandidateSection, bounds: &SearchBounds) -> bool {
    let ar = section.aspect_ratio();
    ar >= bounds.aspect_min && ar <= bounds.aspect_max
}

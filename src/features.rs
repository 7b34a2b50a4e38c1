//! Physics-informed indicators used by the interaction-diagram oracle.
//!
//! All quantities are the dimensionless "abacus" variables of column design:
//! loads are factored by γf, concrete strength reduced by γc, and moments
//! expressed in kN·cm so that they combine with section dimensions in cm.

use crate::column::{CandidateSection, LoadVector};
use serde::{Deserialize, Serialize};

/// Load amplification factor applied to N, Mx, My.
pub const GAMMA_F: f64 = 1.4;
/// Concrete strength reduction factor.
pub const GAMMA_C: f64 = 1.4;
/// L/i for a rectangle: i = h/√12, so λ = √12·L/h.
pub const SLENDERNESS_FACTOR: f64 = 3.46;

/// Number of scalars handed to the oracle.
pub const FEATURE_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub section: CandidateSection,
    /// Normalized axial ratio ν. Above 1.0 the concrete alone crushes.
    pub nu: f64,
    pub mu_x: f64,
    pub mu_y: f64,
    pub lambda_x: f64,
    pub lambda_y: f64,
    /// Governing slenderness, max(λx, λy).
    pub lambda: f64,
    /// ν·λ², proxy for P-Delta sensitivity.
    pub second_order_index: f64,
    pub aspect_ratio: f64,
}

impl FeatureVector {
    /// Oracle input in its pinned order:
    /// `[nu, mu_x, mu_y, lambda, second_order_index, aspect_ratio]`.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nu,
            self.mu_x,
            self.mu_y,
            self.lambda,
            self.second_order_index,
            self.aspect_ratio,
        ]
    }
}

/// Design concrete strength in kN/cm² (MPa / 10).
#[inline]
pub fn design_strength(fck: f64) -> f64 {
    (fck / GAMMA_C) / 10.0
}

/// Pure function of its inputs. Callers guarantee positive dimensions.
pub fn compute_features(load: &LoadVector, section: &CandidateSection, fck: f64) -> FeatureVector {
    let b = section.width;
    let h = section.height;
    let ac = section.gross_area();
    let fcd = design_strength(fck);

    let nd = load.axial.abs() * GAMMA_F;
    // kN·m -> kN·cm
    let mxd = load.moment_x.abs() * GAMMA_F * 100.0;
    let myd = load.moment_y.abs() * GAMMA_F * 100.0;

    let nu = nd / (ac * fcd);
    // Mx bends about the axis parallel to the width, so height is the lever arm
    let mu_x = mxd / (ac * h * fcd);
    let mu_y = myd / (ac * b * fcd);

    let length_cm = load.length_cm();
    let lambda_x = SLENDERNESS_FACTOR * length_cm / b;
    let lambda_y = SLENDERNESS_FACTOR * length_cm / h;
    let lambda = lambda_x.max(lambda_y);

    FeatureVector {
        section: *section,
        nu,
        mu_x,
        mu_y,
        lambda_x,
        lambda_y,
        lambda,
        second_order_index: nu * lambda * lambda,
        aspect_ratio: section.aspect_ratio(),
    }
}

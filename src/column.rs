use crate::error::{invalid, PfResult};
use clap::Args;
use serde::{Deserialize, Serialize};

/// Controlling load combination for one column.
///
/// Forces in kN, moments in kN·m, unsupported length in m.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadVector {
    /// Axial force N (kN)
    #[arg(long = "n", allow_negative_numbers = true)]
    pub axial: f64,
    /// Major-axis moment Mx (kN·m)
    #[arg(long = "mx", default_value_t = 0.0, allow_negative_numbers = true)]
    pub moment_x: f64,
    /// Minor-axis moment My (kN·m)
    #[arg(long = "my", default_value_t = 0.0, allow_negative_numbers = true)]
    pub moment_y: f64,
    /// Unsupported length L (m)
    #[arg(long = "length", default_value_t = 3.0)]
    pub length: f64,
}

impl LoadVector {
    pub fn new(axial: f64, moment_x: f64, moment_y: f64, length: f64) -> Self {
        Self {
            axial,
            moment_x,
            moment_y,
            length,
        }
    }

    pub fn validate(&self) -> PfResult<()> {
        if !self.axial.is_finite() || self.axial <= 0.0 {
            return Err(invalid(format!(
                "axial force must be positive, got {}",
                self.axial
            )));
        }
        if !self.moment_x.is_finite() || !self.moment_y.is_finite() {
            return Err(invalid("bending moments must be finite"));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(invalid(format!(
                "unsupported length must be positive, got {}",
                self.length
            )));
        }
        Ok(())
    }

    /// Unsupported length in centimetres.
    #[inline]
    pub fn length_cm(&self) -> f64 {
        self.length * 100.0
    }
}

/// One (width, height) grid point, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateSection {
    pub width: f64,
    pub height: f64,
}

impl CandidateSection {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> PfResult<()> {
        let finite = self.width.is_finite() && self.height.is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid(format!(
                "section dimensions must be positive and finite, got {} x {}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Gross concrete area Ac (cm²).
    #[inline]
    pub fn gross_area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width.max(self.height) / self.width.min(self.height)
    }

    #[inline]
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

use crate::error::{invalid, PfResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything that stays fixed for one optimization run.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixedParameters {
    #[command(flatten)]
    pub material: MaterialParams,
    #[command(flatten)]
    pub costs: CostRates,
    #[command(flatten)]
    pub bounds: SearchBounds,
    #[command(flatten)]
    pub rules: DesignRules,
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    /// Characteristic concrete strength (MPa)
    #[arg(long, default_value_t = 30.0)]
    pub fck: f64,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self { fck: 30.0 }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    /// Concrete price per m³
    #[arg(long, default_value_t = 450.0)]
    pub concrete_price_m3: f64,
    /// Steel price per kg
    #[arg(long, default_value_t = 12.0)]
    pub steel_price_kg: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            concrete_price_m3: 450.0,
            steel_price_kg: 12.0,
        }
    }
}

/// Grid limits in centimetres.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBounds {
    #[arg(long, default_value_t = 20.0)]
    pub width_min: f64,
    #[arg(long, default_value_t = 60.0)]
    pub width_max: f64,
    #[arg(long, default_value_t = 5.0)]
    pub width_step: f64,
    #[arg(long, default_value_t = 20.0)]
    pub height_min: f64,
    #[arg(long, default_value_t = 60.0)]
    pub height_max: f64,
    #[arg(long, default_value_t = 5.0)]
    pub height_step: f64,

    // Above ~5 the member behaves as a wall rather than a column
    #[arg(long, default_value_t = 1.0)]
    pub aspect_min: f64,
    #[arg(long, default_value_t = 5.0)]
    pub aspect_max: f64,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            width_min: 20.0,
            width_max: 60.0,
            width_step: 5.0,
            height_min: 20.0,
            height_max: 60.0,
            height_step: 5.0,
            aspect_min: 1.0,
            aspect_max: 5.0,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignRules {
    /// Code-minimum longitudinal reinforcement ratio (As,min / Ac)
    #[arg(long, default_value_t = 0.004)]
    pub min_steel_ratio: f64,
    /// ν below which an oracle rejection is overridden
    #[arg(long, default_value_t = 0.4)]
    pub override_threshold: f64,
    /// Probability at or above which the oracle counts as approving
    #[arg(long, default_value_t = 0.5)]
    pub feasibility_threshold: f64,
    /// Raise oracle-approved steel areas below the code minimum
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub enforce_minimum_steel: bool,
}

impl Default for DesignRules {
    fn default() -> Self {
        Self {
            min_steel_ratio: 0.004,
            override_threshold: 0.4,
            feasibility_threshold: 0.5,
            enforce_minimum_steel: true,
        }
    }
}

impl FixedParameters {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Checks every global setting. Runs before any candidate is generated.
    pub fn validate(&self) -> PfResult<()> {
        let fck = self.material.fck;
        if !fck.is_finite() || fck <= 0.0 {
            return Err(invalid(format!("fck must be positive, got {}", fck)));
        }

        for (name, price) in [
            ("concrete_price_m3", self.costs.concrete_price_m3),
            ("steel_price_kg", self.costs.steel_price_kg),
        ] {
            if !price.is_finite() || price < 0.0 {
                return Err(invalid(format!("{} must be non-negative, got {}", name, price)));
            }
        }

        let b = &self.bounds;
        check_axis("width", b.width_min, b.width_max, b.width_step)?;
        check_axis("height", b.height_min, b.height_max, b.height_step)?;

        if !b.aspect_min.is_finite() || !b.aspect_max.is_finite() {
            return Err(invalid("aspect-ratio limits must be finite"));
        }
        if b.aspect_min < 1.0 {
            return Err(invalid(format!(
                "aspect_min must be at least 1.0, got {}",
                b.aspect_min
            )));
        }
        if b.aspect_min > b.aspect_max {
            return Err(invalid(format!(
                "aspect_min ({}) exceeds aspect_max ({})",
                b.aspect_min, b.aspect_max
            )));
        }

        let r = &self.rules;
        if !(r.min_steel_ratio > 0.0 && r.min_steel_ratio <= 0.08) {
            return Err(invalid(format!(
                "min_steel_ratio must lie in (0, 0.08], got {}",
                r.min_steel_ratio
            )));
        }
        for (name, t) in [
            ("override_threshold", r.override_threshold),
            ("feasibility_threshold", r.feasibility_threshold),
        ] {
            if !(t > 0.0 && t <= 1.0) {
                return Err(invalid(format!("{} must lie in (0, 1], got {}", name, t)));
            }
        }
        Ok(())
    }

    /// Overwrites fields with values that were typed on the command line,
    /// leaving file-provided values in place for everything else.
    pub fn merge_from_cli(&mut self, cli: &FixedParameters, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(material.fck);

        update_if_present!(costs.concrete_price_m3);
        update_if_present!(costs.steel_price_kg);

        update_if_present!(bounds.width_min);
        update_if_present!(bounds.width_max);
        update_if_present!(bounds.width_step);
        update_if_present!(bounds.height_min);
        update_if_present!(bounds.height_max);
        update_if_present!(bounds.height_step);
        update_if_present!(bounds.aspect_min);
        update_if_present!(bounds.aspect_max);

        update_if_present!(rules.min_steel_ratio);
        update_if_present!(rules.override_threshold);
        update_if_present!(rules.feasibility_threshold);
        update_if_present!(rules.enforce_minimum_steel);
    }
}

fn check_axis(name: &str, min: f64, max: f64, step: f64) -> PfResult<()> {
    if !min.is_finite() || !max.is_finite() || !step.is_finite() {
        return Err(invalid(format!("{} bounds must be finite", name)));
    }
    if min <= 0.0 || max <= 0.0 {
        return Err(invalid(format!(
            "{} bounds must be positive, got [{}, {}]",
            name, min, max
        )));
    }
    if step <= 0.0 {
        return Err(invalid(format!("{} step must be positive, got {}", name, step)));
    }
    if min > max {
        return Err(invalid(format!(
            "{} minimum ({}) exceeds maximum ({})",
            name, min, max
        )));
    }
    Ok(())
}

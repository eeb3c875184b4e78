//! Logistic mapping from composite score to admission probability.
//!
//! Without a per-institution calibration the curve is derived from the acceptance rate alone:
//! a hypothetical pool averaging [`POOL_MEAN_COMPOSITE`] lands exactly on the acceptance rate,
//! and more selective institutions get a steeper curve.

use serde::{Deserialize, Serialize};

pub const MIN_PROBABILITY: f64 = 0.02;
pub const MAX_PROBABILITY: f64 = 0.98;
pub const MIN_ACCEPTANCE_RATE: f64 = 0.03;
pub const MAX_ACCEPTANCE_RATE: f64 = 0.8;
pub const POOL_MEAN_COMPOSITE: f64 = 600.0;
/// Steepness used once the linear rule reaches zero, at acceptance rates of 75% and above.
pub const MIN_STEEPNESS: f64 = 0.001;

const BASE_STEEPNESS: f64 = 0.012;
const SELECTIVITY_SLOPE: f64 = 0.02;
const SELECTIVITY_PIVOT: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParams {
    /// Curve steepness (A).
    pub steepness: f64,
    /// Composite score at which the probability is one half (C).
    pub center: f64,
}

impl CalibrationParams {
    pub fn is_usable(&self) -> bool {
        self.steepness.is_finite() && self.steepness > 0.0 && self.center.is_finite()
    }
}

pub fn logistic_prob(score: f64, calibration: &CalibrationParams) -> f64 {
    let exponent = -calibration.steepness * (score - calibration.center);
    (1.0 / (1.0 + exponent.exp())).clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

pub fn default_calibration(acceptance_rate: f64) -> CalibrationParams {
    let rate = acceptance_rate.clamp(MIN_ACCEPTANCE_RATE, MAX_ACCEPTANCE_RATE);
    let linear = BASE_STEEPNESS + SELECTIVITY_SLOPE * (SELECTIVITY_PIVOT - rate);
    let steepness = if linear > 0.0 { linear } else { MIN_STEEPNESS };
    let log_odds = (rate / (1.0 - rate)).ln();

    CalibrationParams {
        steepness,
        center: POOL_MEAN_COMPOSITE - log_odds / steepness,
    }
}

pub fn admission_probability(composite: f64, calibration: &CalibrationParams) -> f64 {
    logistic_prob(composite, calibration)
}

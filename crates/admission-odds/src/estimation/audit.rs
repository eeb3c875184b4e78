use serde::{Deserialize, Serialize};

use super::composite::clamp_factor_score;
use super::factors::{FactorKey, FactorScoreMap};
use super::normalizer::NEUTRAL_SCORE;
use super::weights::WeightTable;

pub const NOTE_POLICY_GATED: &str = "policy-gated";
pub const NOTE_NEUTRAL_DEFAULT: &str = "neutral default (no data)";
pub const NOTE_STRENGTH: &str = "exceptional strength";
pub const NOTE_CONCERN: &str = "area of concern";

const STRENGTH_SCORE: f64 = 9.0;
const CONCERN_SCORE: f64 = 3.0;

/// One factor's share of the composite, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRow {
    pub factor: FactorKey,
    pub weight: f64,
    pub score: Option<f64>,
    pub contribution: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Rebuild the per-factor trail from the raw inputs, independent of composite internals.
pub fn build_audit(
    weights: &WeightTable,
    raw: &FactorScoreMap,
    used_factors: &[FactorKey],
) -> Vec<AuditRow> {
    weights
        .iter()
        .map(|(factor, weight)| {
            if !used_factors.contains(&factor) {
                return AuditRow {
                    factor,
                    weight,
                    score: None,
                    contribution: None,
                    note: Some(NOTE_POLICY_GATED.to_string()),
                };
            }

            let supplied = raw.get(&factor).copied();
            let score = clamp_factor_score(supplied.unwrap_or(NEUTRAL_SCORE));
            let note = if supplied.is_none() && score == NEUTRAL_SCORE {
                Some(NOTE_NEUTRAL_DEFAULT)
            } else if score >= STRENGTH_SCORE {
                Some(NOTE_STRENGTH)
            } else if score <= CONCERN_SCORE {
                Some(NOTE_CONCERN)
            } else {
                None
            };

            AuditRow {
                factor,
                weight,
                score: Some(round_to(score, 1)),
                contribution: Some(round_to(score * weight, 3)),
                note: note.map(str::to_string),
            }
        })
        .collect()
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

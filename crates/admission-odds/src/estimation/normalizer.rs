use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::factors::{CollegePolicy, FactorKey, FactorScoreMap};
use super::weights::WeightTable;

/// Midpoint of the 0-10 scale, assumed when a factor has no data.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Every table factor mapped to its resolved value, or `None` when it takes no part in scoring.
pub type NormalizedScores = BTreeMap<FactorKey, Option<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub treat_missing_as_neutral: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            treat_missing_as_neutral: true,
        }
    }
}

pub fn normalize_scores(
    weights: &WeightTable,
    raw: &FactorScoreMap,
    policy: &CollegePolicy,
    options: NormalizeOptions,
) -> NormalizedScores {
    weights
        .iter()
        .map(|(factor, _)| {
            let value = if policy.gates(factor) {
                None
            } else {
                match raw.get(&factor) {
                    Some(score) => Some(*score),
                    None if options.treat_missing_as_neutral => Some(NEUTRAL_SCORE),
                    None => None,
                }
            };
            (factor, value)
        })
        .collect()
}

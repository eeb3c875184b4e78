//! Composite scoring on a 0-1000 scale.
//!
//! The composite is a weighted average over the *active* factors only, so an applicant whose
//! institution ignores testing is scored against the remaining weight rather than losing the
//! testing share outright. Correlated soft factors are dampened once at least two of them are
//! simultaneously strong.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::factors::{CollegePolicy, FactorKey, FactorScoreMap};
use super::normalizer::{normalize_scores, NormalizeOptions};
use super::weights::WeightTable;

pub const MIN_FACTOR_SCORE: f64 = 0.0;
pub const MAX_FACTOR_SCORE: f64 = 10.0;
pub const MAX_COMPOSITE: f64 = 1000.0;
/// Returned when no factor carries weight.
pub const NEUTRAL_COMPOSITE: f64 = 500.0;

/// Cluster factors at or above this score count toward dampening.
pub const CLUSTER_HIGH_SCORE: f64 = 8.0;
pub const CLUSTER_MIN_HIGH: usize = 2;
pub const CLUSTER_DAMPENING: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub composite: f64,
    pub sum_of_active_weights: f64,
    pub used_factors: Vec<FactorKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_note: Option<String>,
    /// Post-dampening weight of every active factor.
    pub effective_weights: BTreeMap<FactorKey, f64>,
}

pub fn clamp_factor_score(score: f64) -> f64 {
    score.clamp(MIN_FACTOR_SCORE, MAX_FACTOR_SCORE)
}

pub fn compute_composite(
    weights: &WeightTable,
    raw: &FactorScoreMap,
    policy: &CollegePolicy,
    options: NormalizeOptions,
) -> CompositeResult {
    let active: Vec<(FactorKey, f64)> = normalize_scores(weights, raw, policy, options)
        .into_iter()
        .filter_map(|(factor, value)| value.map(|score| (factor, clamp_factor_score(score))))
        .collect();

    let qualifying: Vec<FactorKey> = active
        .iter()
        .filter(|(factor, score)| weights.is_cluster(*factor) && *score >= CLUSTER_HIGH_SCORE)
        .map(|(factor, _)| *factor)
        .collect();
    let dampen = qualifying.len() >= CLUSTER_MIN_HIGH;

    let mut effective_weights = BTreeMap::new();
    let mut weighted_sum = 0.0;
    let mut sum_of_active_weights = 0.0;
    for (factor, score) in &active {
        let mut weight = weights.weight(*factor);
        if dampen && weights.is_cluster(*factor) {
            weight *= CLUSTER_DAMPENING;
        }
        weighted_sum += score * weight;
        sum_of_active_weights += weight;
        effective_weights.insert(*factor, weight);
    }

    let composite = if sum_of_active_weights == 0.0 {
        NEUTRAL_COMPOSITE
    } else {
        (weighted_sum / (MAX_FACTOR_SCORE * sum_of_active_weights) * MAX_COMPOSITE)
            .clamp(0.0, MAX_COMPOSITE)
    };

    let cluster_note = dampen.then(|| {
        let names: Vec<&str> = qualifying.iter().map(|factor| factor.as_str()).collect();
        format!("cluster_dampened_15pct: {}", names.join(","))
    });

    CompositeResult {
        composite,
        sum_of_active_weights,
        used_factors: active.iter().map(|(factor, _)| *factor).collect(),
        cluster_note,
        effective_weights,
    }
}

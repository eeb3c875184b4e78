//! Admission odds estimation from weighted fit factors.
//!
//! Raw factor scores flow through normalization, the composite calculator, the conduct
//! override, and the logistic probability model. The audit trail and insights are rebuilt from
//! the same raw inputs for presentation. Every step is a pure function of its arguments; the
//! only shared state is the immutable [`WeightTable`].

pub mod audit;
pub mod composite;
pub mod conduct;
pub mod factors;
pub mod insights;
pub mod normalizer;
pub mod percentile;
pub mod probability;
pub mod report;
pub mod router;
pub mod weights;

#[cfg(test)]
mod tests;

pub use audit::{build_audit, AuditRow};
pub use composite::{compute_composite, CompositeResult};
pub use conduct::{apply_conduct_penalty, conduct_penalty};
pub use factors::{CollegePolicy, FactorKey, FactorScoreMap, UnknownFactor};
pub use insights::{extract_insights, Insights, DEFAULT_TOP_N};
pub use normalizer::{normalize_scores, NormalizeOptions, NormalizedScores};
pub use percentile::estimate_percentile;
pub use probability::{
    admission_probability, default_calibration, logistic_prob, CalibrationParams,
};
pub use report::AuditReport;
pub use router::estimation_router;
pub use weights::{WeightTable, WeightTableSummary, CLUSTER_FACTORS};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Defaults applied when a request leaves an option unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorDefaults {
    pub treat_missing_as_neutral: bool,
    pub top_n: usize,
}

impl Default for EstimatorDefaults {
    fn default() -> Self {
        Self {
            treat_missing_as_neutral: true,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Inputs for a single estimate, as supplied by a form or API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub scores: FactorScoreMap,
    #[serde(default)]
    pub policy: CollegePolicy,
    pub acceptance_rate: f64,
    #[serde(default)]
    pub calibration: Option<CalibrationParams>,
    #[serde(default)]
    pub treat_missing_as_neutral: Option<bool>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl EstimateRequest {
    pub fn new(scores: FactorScoreMap, policy: CollegePolicy, acceptance_rate: f64) -> Self {
        Self {
            scores,
            policy,
            acceptance_rate,
            calibration: None,
            treat_missing_as_neutral: None,
            top_n: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub report: AuditReport,
    pub insights: Insights,
}

/// Stateless estimator over an injected weight table.
#[derive(Debug, Clone)]
pub struct AdmissionEstimator {
    weights: Arc<WeightTable>,
    defaults: EstimatorDefaults,
}

impl Default for AdmissionEstimator {
    fn default() -> Self {
        Self::new(Arc::new(WeightTable::standard()))
    }
}

impl AdmissionEstimator {
    pub fn new(weights: Arc<WeightTable>) -> Self {
        Self::with_defaults(weights, EstimatorDefaults::default())
    }

    /// Validates the table once; drift is logged and scoring proceeds with the given weights.
    pub fn with_defaults(weights: Arc<WeightTable>, defaults: EstimatorDefaults) -> Self {
        if !weights.validate() {
            warn!(
                total = weights.total(),
                "factor weights do not sum to 100; estimates will use drifted weights"
            );
        }

        Self { weights, defaults }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn defaults(&self) -> EstimatorDefaults {
        self.defaults
    }

    pub fn composite(&self, scores: &FactorScoreMap, policy: &CollegePolicy) -> CompositeResult {
        compute_composite(
            &self.weights,
            scores,
            policy,
            NormalizeOptions {
                treat_missing_as_neutral: self.defaults.treat_missing_as_neutral,
            },
        )
    }

    pub fn audit(&self, scores: &FactorScoreMap, used_factors: &[FactorKey]) -> Vec<AuditRow> {
        build_audit(&self.weights, scores, used_factors)
    }

    pub fn estimate(&self, request: &EstimateRequest) -> Estimate {
        let options = NormalizeOptions {
            treat_missing_as_neutral: request
                .treat_missing_as_neutral
                .unwrap_or(self.defaults.treat_missing_as_neutral),
        };
        let composite = compute_composite(&self.weights, &request.scores, &request.policy, options);

        let conduct_score = request.scores.get(&FactorKey::ConductRecord).copied();
        let penalty = conduct_penalty(conduct_score);
        let final_composite = apply_conduct_penalty(composite.composite, conduct_score);

        let (calibration, calibration_rejected) = match request.calibration {
            Some(custom) if custom.is_usable() => (custom, false),
            Some(_) => (default_calibration(request.acceptance_rate), true),
            None => (default_calibration(request.acceptance_rate), false),
        };

        let probability = admission_probability(final_composite, &calibration);
        let percentile = estimate_percentile(probability, request.acceptance_rate);

        let rows = build_audit(&self.weights, &request.scores, &composite.used_factors);
        let insights = extract_insights(&rows, request.top_n.unwrap_or(self.defaults.top_n));
        let policy_notes =
            report::policy_notes(&request.policy, &composite, penalty, calibration_rejected);

        debug!(
            composite = composite.composite,
            final_composite,
            probability,
            percentile,
            active_factors = composite.used_factors.len(),
            "admission estimate computed"
        );

        Estimate {
            report: AuditReport {
                composite: composite.composite,
                final_composite,
                conduct_penalty: penalty,
                probability,
                acceptance_rate: request.acceptance_rate,
                calibration,
                percentile,
                rows,
                policy_notes,
            },
            insights,
        }
    }
}

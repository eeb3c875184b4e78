use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::estimation::{
    AdmissionEstimator, CollegePolicy, EstimateRequest, FactorKey, FactorScoreMap, WeightTable,
};

pub(super) fn estimator() -> AdmissionEstimator {
    AdmissionEstimator::new(Arc::new(WeightTable::standard()))
}

pub(super) fn open_policy() -> CollegePolicy {
    CollegePolicy {
        uses_testing: true,
        need_aware: true,
    }
}

pub(super) fn test_optional_need_blind() -> CollegePolicy {
    CollegePolicy {
        uses_testing: false,
        need_aware: false,
    }
}

pub(super) fn uniform_scores(score: f64) -> FactorScoreMap {
    FactorKey::ALL.iter().map(|factor| (*factor, score)).collect()
}

/// Neutral applicant with a handful of standout soft factors.
pub(super) fn standout_scores() -> FactorScoreMap {
    let mut scores = uniform_scores(5.0);
    scores.insert(FactorKey::Grades, 9.0);
    scores.insert(FactorKey::Essay, 9.0);
    scores.insert(FactorKey::EcsLeadership, 9.0);
    scores.insert(FactorKey::AwardsPublications, 9.0);
    scores
}

pub(super) fn request(scores: FactorScoreMap, acceptance_rate: f64) -> EstimateRequest {
    EstimateRequest::new(scores, open_policy(), acceptance_rate)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::{AdmissionEstimator, EstimateRequest};

/// Router builder exposing the estimator over HTTP.
pub fn estimation_router(estimator: Arc<AdmissionEstimator>) -> Router {
    Router::new()
        .route("/api/v1/admission/estimate", post(estimate_handler))
        .route("/api/v1/admission/weights", get(weights_handler))
        .with_state(estimator)
}

pub(crate) async fn estimate_handler(
    State(estimator): State<Arc<AdmissionEstimator>>,
    axum::Json(request): axum::Json<EstimateRequest>,
) -> Response {
    let estimate = estimator.estimate(&request);
    (StatusCode::OK, axum::Json(estimate)).into_response()
}

pub(crate) async fn weights_handler(
    State(estimator): State<Arc<AdmissionEstimator>>,
) -> Response {
    let summary = estimator.weights().summary();
    (StatusCode::OK, axum::Json(summary)).into_response()
}

use crate::infra::AppState;
use admission_odds::error::AppError;
use admission_odds::estimation::{
    estimation_router, AdmissionEstimator, CalibrationParams, CollegePolicy, Estimate,
    EstimateRequest,
};
use admission_odds::import::ScoreImporter;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Estimate request carrying raw `factor,score` CSV instead of a score map.
#[derive(Debug, Deserialize)]
pub(crate) struct CsvEstimateRequest {
    pub(crate) scores_csv: String,
    #[serde(default)]
    pub(crate) policy: CollegePolicy,
    pub(crate) acceptance_rate: f64,
    #[serde(default)]
    pub(crate) calibration: Option<CalibrationParams>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
}

pub(crate) fn with_estimation_routes(estimator: Arc<AdmissionEstimator>) -> axum::Router {
    estimation_router(estimator.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/admission/estimate/csv",
            axum::routing::post(csv_estimate_endpoint).with_state(estimator),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn csv_estimate_endpoint(
    State(estimator): State<Arc<AdmissionEstimator>>,
    Json(payload): Json<CsvEstimateRequest>,
) -> Result<Json<Estimate>, AppError> {
    let CsvEstimateRequest {
        scores_csv,
        policy,
        acceptance_rate,
        calibration,
        top_n,
    } = payload;

    let scores = ScoreImporter::from_reader(Cursor::new(scores_csv.into_bytes()))?;
    let mut request = EstimateRequest::new(scores, policy, acceptance_rate);
    request.calibration = calibration;
    request.top_n = top_n;

    Ok(Json(estimator.estimate(&request)))
}

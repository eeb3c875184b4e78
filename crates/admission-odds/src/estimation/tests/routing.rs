use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::estimation::router::{estimate_handler, weights_handler};
use crate::estimation::estimation_router;

#[tokio::test]
async fn estimate_handler_returns_report_and_insights() {
    let response = estimate_handler(
        State(Arc::new(estimator())),
        axum::Json(request(standout_scores(), 0.1)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let report = payload.get("report").expect("report present");
    assert!(report.get("composite").and_then(|v| v.as_f64()).is_some());
    assert_eq!(
        report
            .get("rows")
            .and_then(|rows| rows.as_array())
            .map(Vec::len),
        Some(20)
    );
    let strengths = payload
        .pointer("/insights/strengths")
        .and_then(|v| v.as_array())
        .expect("strengths array");
    assert_eq!(strengths[0], json!("grades (9/10)"));
}

#[tokio::test]
async fn weights_handler_reports_table_validity() {
    let response = weights_handler(State(Arc::new(estimator()))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("valid"), Some(&json!(true)));
    assert_eq!(payload.get("total"), Some(&json!(100.0)));
    assert_eq!(
        payload.get("cluster"),
        Some(&json!([
            "ecs_leadership",
            "awards_publications",
            "portfolio_audition",
            "essay"
        ]))
    );
}

#[tokio::test]
async fn estimate_route_accepts_sparse_payloads() {
    let router = estimation_router(Arc::new(estimator()));
    let body = json!({
        "scores": { "grades": 9.5, "testing": 2, "conduct_record": 1 },
        "policy": { "uses_testing": false },
        "acceptance_rate": 0.2
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/admission/estimate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let notes = payload
        .pointer("/report/policy_notes")
        .and_then(|v| v.as_array())
        .expect("policy notes");
    assert!(notes.contains(&json!("testing not considered (test-optional policy)")));
    assert!(notes.contains(&json!("conduct penalty applied: -32")));
    assert_eq!(
        payload.pointer("/report/rows/2/note"),
        Some(&json!("policy-gated"))
    );
}

#[tokio::test]
async fn estimate_route_rejects_unknown_factors() {
    let router = estimation_router(Arc::new(estimator()));
    let body = json!({
        "scores": { "gpa": 4.0 },
        "acceptance_rate": 0.2
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/admission/estimate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

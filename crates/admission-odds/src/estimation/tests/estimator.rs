use std::sync::Arc;

use super::common::*;
use crate::estimation::probability::MIN_PROBABILITY;
use crate::estimation::report::{NOTE_CALIBRATION_REJECTED, NOTE_NEED_BLIND, NOTE_TESTING_GATED};
use crate::estimation::{
    AdmissionEstimator, CalibrationParams, EstimatorDefaults, FactorKey, FactorScoreMap,
    WeightTable,
};

#[test]
fn estimate_assembles_the_full_report() {
    let estimate = estimator().estimate(&request(uniform_scores(5.0), 0.05));
    let report = &estimate.report;

    assert_eq!(report.composite, 500.0);
    assert_eq!(report.final_composite, 500.0);
    assert_eq!(report.conduct_penalty, 0.0);
    assert_eq!(report.probability, MIN_PROBABILITY);
    assert_eq!(report.acceptance_rate, 0.05);
    assert!((report.percentile - 20.0).abs() < 1e-9);
    assert_eq!(report.rows.len(), FactorKey::ALL.len());
    assert!(report.policy_notes.is_empty());

    assert!(estimate.insights.strengths.is_empty());
    assert_eq!(estimate.insights.weaknesses.len(), 3);
}

#[test]
fn weak_conduct_lowers_the_final_composite() {
    let mut scores = uniform_scores(5.0);
    scores.insert(FactorKey::ConductRecord, 0.0);

    let report = estimator().estimate(&request(scores, 0.3)).report;

    assert!(report.composite < 500.0);
    assert!((report.final_composite - (report.composite - 40.0)).abs() < 1e-9);
    assert_eq!(report.conduct_penalty, 40.0);
    assert!(report
        .policy_notes
        .iter()
        .any(|note| note == "conduct penalty applied: -40"));
}

#[test]
fn missing_conduct_score_applies_no_penalty() {
    let mut scores = uniform_scores(5.0);
    scores.remove(&FactorKey::ConductRecord);

    let report = estimator().estimate(&request(scores, 0.3)).report;
    assert_eq!(report.final_composite, report.composite);
}

#[test]
fn policy_notes_explain_gated_factors() {
    let mut req = request(super::common::standout_scores(), 0.1);
    req.policy = test_optional_need_blind();

    let report = estimator().estimate(&req).report;

    assert_eq!(
        report.policy_notes,
        vec![
            NOTE_TESTING_GATED.to_string(),
            NOTE_NEED_BLIND.to_string(),
            "cluster_dampened_15pct: essay,ecs_leadership,awards_publications".to_string(),
        ]
    );
    let gated: Vec<FactorKey> = report
        .rows
        .iter()
        .filter(|row| row.score.is_none())
        .map(|row| row.factor)
        .collect();
    assert_eq!(gated, vec![FactorKey::Testing, FactorKey::AbilityToPay]);
}

#[test]
fn custom_calibration_overrides_the_default() {
    let mut req = request(uniform_scores(5.0), 0.05);
    req.calibration = Some(CalibrationParams {
        steepness: 0.01,
        center: 500.0,
    });

    let report = estimator().estimate(&req).report;
    assert!((report.probability - 0.5).abs() < 1e-12);
    assert!(report.percentile > 50.0);
}

#[test]
fn degenerate_calibration_falls_back_to_default() {
    let mut req = request(uniform_scores(5.0), 0.05);
    req.calibration = Some(CalibrationParams {
        steepness: -0.5,
        center: 500.0,
    });

    let report = estimator().estimate(&req).report;
    assert_eq!(report.probability, MIN_PROBABILITY);
    assert!(report
        .policy_notes
        .contains(&NOTE_CALIBRATION_REJECTED.to_string()));
}

#[test]
fn request_options_override_estimator_defaults() {
    let mut scores = FactorScoreMap::new();
    scores.insert(FactorKey::Grades, 9.5);
    scores.insert(FactorKey::Rigor, 8.0);
    scores.insert(FactorKey::Essay, 7.5);
    scores.insert(FactorKey::Interview, 2.0);

    let estimator = AdmissionEstimator::with_defaults(
        Arc::new(WeightTable::standard()),
        EstimatorDefaults {
            treat_missing_as_neutral: false,
            top_n: 1,
        },
    );

    let mut req = request(scores, 0.2);
    let narrow = estimator.estimate(&req);
    assert_eq!(narrow.insights.strengths, vec!["grades (9.5/10)".to_string()]);
    assert_eq!(
        narrow
            .report
            .rows
            .iter()
            .filter(|row| row.score.is_some())
            .count(),
        4
    );

    req.treat_missing_as_neutral = Some(true);
    req.top_n = Some(3);
    let wide = estimator.estimate(&req);
    assert_eq!(wide.insights.strengths.len(), 3);
    assert!(wide.report.rows.iter().all(|row| row.score.is_some()));
}

#[test]
fn drifted_table_still_scores() {
    let table = WeightTable::from_entries([(FactorKey::Grades, 50.0), (FactorKey::Rigor, 10.0)]);
    assert!(!table.validate());

    let estimator = AdmissionEstimator::new(Arc::new(table));
    let mut scores = FactorScoreMap::new();
    scores.insert(FactorKey::Grades, 8.0);
    scores.insert(FactorKey::Rigor, 2.0);

    let report = estimator.estimate(&request(scores, 0.25)).report;
    assert!((report.composite - (8.0 * 50.0 + 2.0 * 10.0) / 600.0 * 1000.0).abs() < 1e-9);
}

#[test]
fn estimator_is_shareable_across_threads() {
    let estimator = Arc::new(estimator());
    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let estimator = Arc::clone(&estimator);
            std::thread::spawn(move || {
                let scores = uniform_scores(f64::from(offset) + 5.0);
                estimator.estimate(&request(scores, 0.1)).report.composite
            })
        })
        .collect();

    for (offset, handle) in handles.into_iter().enumerate() {
        let composite = handle.join().expect("thread completes");
        assert!((composite - (500.0 + 100.0 * offset as f64)).abs() < 1e-9);
    }
}

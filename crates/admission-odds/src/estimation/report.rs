use serde::{Deserialize, Serialize};

use super::audit::{round_to, AuditRow};
use super::composite::CompositeResult;
use super::factors::CollegePolicy;
use super::probability::CalibrationParams;

pub const NOTE_TESTING_GATED: &str = "testing not considered (test-optional policy)";
pub const NOTE_NEED_BLIND: &str = "ability to pay not considered (need-blind policy)";
pub const NOTE_CALIBRATION_REJECTED: &str = "custom calibration rejected; using default";

/// Everything a caller needs to render an estimate and explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub composite: f64,
    pub final_composite: f64,
    pub conduct_penalty: f64,
    pub probability: f64,
    pub acceptance_rate: f64,
    pub calibration: CalibrationParams,
    pub percentile: f64,
    pub rows: Vec<AuditRow>,
    pub policy_notes: Vec<String>,
}

pub(crate) fn policy_notes(
    policy: &CollegePolicy,
    composite: &CompositeResult,
    conduct_penalty: f64,
    calibration_rejected: bool,
) -> Vec<String> {
    let mut notes = Vec::new();
    if !policy.uses_testing {
        notes.push(NOTE_TESTING_GATED.to_string());
    }
    if !policy.need_aware {
        notes.push(NOTE_NEED_BLIND.to_string());
    }
    if let Some(cluster) = &composite.cluster_note {
        notes.push(cluster.clone());
    }
    if conduct_penalty > 0.0 {
        notes.push(format!(
            "conduct penalty applied: -{}",
            round_to(conduct_penalty, 1)
        ));
    }
    if calibration_rejected {
        notes.push(NOTE_CALIBRATION_REJECTED.to_string());
    }
    notes
}

use super::composite::clamp_factor_score;

/// Conduct scores below this threshold trigger a penalty.
pub const CONDUCT_THRESHOLD: f64 = 5.0;
/// Composite points deducted per conduct point below the threshold.
pub const CONDUCT_PENALTY_PER_POINT: f64 = 8.0;

/// Points that [`apply_conduct_penalty`] would deduct for `conduct_score`.
pub fn conduct_penalty(conduct_score: Option<f64>) -> f64 {
    match conduct_score.map(clamp_factor_score) {
        Some(score) if score < CONDUCT_THRESHOLD => {
            (CONDUCT_THRESHOLD - score) * CONDUCT_PENALTY_PER_POINT
        }
        _ => 0.0,
    }
}

/// Hard override applied after the composite is computed, floored at zero.
pub fn apply_conduct_penalty(composite: f64, conduct_score: Option<f64>) -> f64 {
    let penalty = conduct_penalty(conduct_score);
    if penalty == 0.0 {
        composite
    } else {
        (composite - penalty).max(0.0)
    }
}

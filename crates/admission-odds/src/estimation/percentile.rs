/// Percentile reported when the acceptance rate gives no reference point.
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

const ABOVE_RATE_DECAY: f64 = 0.5;

/// Map a probability, relative to the raw acceptance rate, onto 0-100.
///
/// Matching the acceptance rate is the 50th percentile. Below it the scale is linear; above it
/// the percentile approaches 100 asymptotically.
pub fn estimate_percentile(probability: f64, acceptance_rate: f64) -> f64 {
    if acceptance_rate <= 0.0 {
        return NEUTRAL_PERCENTILE;
    }

    let ratio = probability / acceptance_rate;
    let percentile = if ratio >= 1.0 {
        50.0 + 50.0 * (1.0 - (-ABOVE_RATE_DECAY * (ratio - 1.0)).exp())
    } else {
        50.0 * ratio
    };
    percentile.clamp(0.0, 100.0)
}

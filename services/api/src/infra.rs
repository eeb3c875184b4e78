use admission_odds::config::EstimationConfig;
use admission_odds::estimation::{AdmissionEstimator, WeightTable};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the process-wide estimator once; the weight table is validated here.
pub(crate) fn build_estimator(config: &EstimationConfig) -> Arc<AdmissionEstimator> {
    Arc::new(AdmissionEstimator::with_defaults(
        Arc::new(WeightTable::standard()),
        config.estimator_defaults(),
    ))
}

pub(crate) fn parse_acceptance_rate(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a rate ({err})"))?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("acceptance rate must be between 0 and 1, got {value}"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_rate_parser_bounds_input() {
        assert_eq!(parse_acceptance_rate(" 0.07 "), Ok(0.07));
        assert!(parse_acceptance_rate("7%").is_err());
        assert!(parse_acceptance_rate("1.5").is_err());
        assert!(parse_acceptance_rate("NaN").is_err());
    }

    #[test]
    fn estimator_honors_configured_defaults() {
        let estimator = build_estimator(&EstimationConfig {
            treat_missing_as_neutral: false,
            insights_top_n: 4,
        });
        assert!(!estimator.defaults().treat_missing_as_neutral);
        assert_eq!(estimator.defaults().top_n, 4);
        assert!(estimator.weights().validate());
    }
}

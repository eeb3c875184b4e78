use crate::infra::build_estimator;
use admission_odds::config::AppConfig;
use admission_odds::error::AppError;
use admission_odds::estimation::{CollegePolicy, Estimate, EstimateRequest};
use admission_odds::import::ScoreImporter;
use admission_odds::telemetry;
use clap::Args;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// CSV file with `factor,score` rows on the 0-10 scale
    #[arg(long)]
    pub(crate) scores: PathBuf,
    /// Published acceptance rate of the college (0-1)
    #[arg(long, value_parser = crate::infra::parse_acceptance_rate)]
    pub(crate) acceptance_rate: f64,
    /// The college does not consider test scores
    #[arg(long)]
    pub(crate) test_optional: bool,
    /// The college does not consider ability to pay
    #[arg(long)]
    pub(crate) need_blind: bool,
    /// Number of strengths and weaknesses to list
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the full estimate as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        scores,
        acceptance_rate,
        test_optional,
        need_blind,
        top,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let scores = ScoreImporter::from_path(scores)?;
    let policy = CollegePolicy {
        uses_testing: !test_optional,
        need_aware: !need_blind,
    };
    let mut request = EstimateRequest::new(scores, policy, acceptance_rate);
    request.top_n = top;

    let estimate = build_estimator(&config.estimation).estimate(&request);
    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print!("{}", EstimateSummary(&estimate));
    }

    Ok(())
}

/// Plain-text rendering of an estimate for terminal output.
pub(crate) struct EstimateSummary<'a>(pub(crate) &'a Estimate);

impl fmt::Display for EstimateSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimate = self.0;
        let report = &estimate.report;

        writeln!(f, "Admission odds estimate")?;
        writeln!(
            f,
            "Composite: {:.1} (after conduct: {:.1})",
            report.composite, report.final_composite
        )?;
        writeln!(
            f,
            "Probability: {:.1}% at a {:.1}% acceptance rate",
            report.probability * 100.0,
            report.acceptance_rate * 100.0
        )?;
        writeln!(f, "Percentile: {:.0}", report.percentile)?;

        writeln!(f, "\nFactor audit")?;
        for row in &report.rows {
            let score = row
                .score
                .map(|score| format!("{score}/10"))
                .unwrap_or_else(|| "-".to_string());
            let contribution = row
                .contribution
                .map(|value| format!("{value:.3}"))
                .unwrap_or_else(|| "-".to_string());
            write!(
                f,
                "- {}: weight {}, score {}, contribution {}",
                row.factor, row.weight, score, contribution
            )?;
            match &row.note {
                Some(note) => writeln!(f, " [{note}]")?,
                None => writeln!(f)?,
            }
        }

        write_list(f, "Strengths", &estimate.insights.strengths)?;
        write_list(f, "Weaknesses", &estimate.insights.weaknesses)?;
        write_list(f, "Policy notes", &report.policy_notes)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, entries: &[String]) -> fmt::Result {
    if entries.is_empty() {
        return writeln!(f, "\n{title}: none");
    }

    writeln!(f, "\n{title}")?;
    for entry in entries {
        writeln!(f, "- {entry}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use admission_odds::estimation::{AdmissionEstimator, FactorKey, FactorScoreMap};

    fn sample_estimate(policy: CollegePolicy) -> Estimate {
        let scores: FactorScoreMap = [
            (FactorKey::Grades, 9.5),
            (FactorKey::Essay, 4.0),
            (FactorKey::ConductRecord, 10.0),
        ]
        .into_iter()
        .collect();
        AdmissionEstimator::default().estimate(&EstimateRequest::new(scores, policy, 0.1))
    }

    #[test]
    fn text_rendering_lists_every_factor_and_insight() {
        let estimate = sample_estimate(CollegePolicy::default());
        let rendered = EstimateSummary(&estimate).to_string();

        assert!(rendered.starts_with("Admission odds estimate\n"));
        assert!(rendered.matches("\n- ").count() >= 20);
        assert!(rendered.contains("- grades: weight 16, score 9.5/10"));
        assert!(rendered.contains("[exceptional strength]"));
        assert!(rendered.contains("\nWeaknesses\n- essay (4/10)"));
        assert!(rendered.contains("Policy notes: none"));
    }

    #[test]
    fn text_rendering_marks_gated_factors() {
        let estimate = sample_estimate(CollegePolicy {
            uses_testing: false,
            need_aware: true,
        });
        let rendered = EstimateSummary(&estimate).to_string();

        assert!(rendered.contains("- testing: weight 8, score -, contribution - [policy-gated]"));
        assert!(rendered.contains("testing not considered (test-optional policy)"));
    }

    #[test]
    fn text_rendering_leads_with_the_headline_numbers() {
        let estimate = sample_estimate(CollegePolicy::default());
        let rendered = EstimateSummary(&estimate).to_string();
        let report = &estimate.report;

        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("Admission odds estimate"));
        assert_eq!(
            lines.next().map(str::to_string),
            Some(format!(
                "Composite: {:.1} (after conduct: {:.1})",
                report.composite, report.final_composite
            ))
        );
        assert!(lines.next().is_some_and(|line| line.ends_with("% at a 10.0% acceptance rate")));
        assert!(rendered.ends_with('\n'));
        assert!(!rendered.contains("\n\n\n"));
    }
}

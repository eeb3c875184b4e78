use serde::{Deserialize, Serialize};

use super::audit::AuditRow;

pub const DEFAULT_TOP_N: usize = 3;

const STRENGTH_FLOOR: f64 = 7.0;
const WEAKNESS_CEILING: f64 = 6.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Pick the strongest and weakest scored factors for display.
///
/// Strengths run highest first; weaknesses run lowest first.
pub fn extract_insights(rows: &[AuditRow], top_n: usize) -> Insights {
    let mut scored: Vec<(&AuditRow, f64)> = rows
        .iter()
        .filter_map(|row| row.score.map(|score| (row, score)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let strengths = scored
        .iter()
        .filter(|(_, score)| *score >= STRENGTH_FLOOR)
        .take(top_n)
        .map(|(row, score)| format_entry(row, *score))
        .collect();

    let weaknesses = scored
        .iter()
        .rev()
        .filter(|(_, score)| *score <= WEAKNESS_CEILING)
        .take(top_n)
        .map(|(row, score)| format_entry(row, *score))
        .collect();

    Insights {
        strengths,
        weaknesses,
    }
}

fn format_entry(row: &AuditRow, score: f64) -> String {
    format!("{} ({}/10)", row.factor, score)
}

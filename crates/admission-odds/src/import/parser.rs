use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::ScoreImportError;
use crate::estimation::{FactorKey, UnknownFactor};

#[derive(Debug)]
pub(crate) struct ScoreRecord {
    pub(crate) factor: FactorKey,
    pub(crate) score: Option<f64>,
}

/// Row-level failure, reported with the 1-based data row it came from.
#[derive(Debug, thiserror::Error)]
pub enum ScoreRowError {
    #[error("row {row}: {source}")]
    UnknownFactor {
        row: usize,
        #[source]
        source: UnknownFactor,
    },
    #[error("row {row}: score '{value}' is not a finite number")]
    InvalidScore { row: usize, value: String },
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ScoreRecord>, ScoreImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<ScoreRow>().enumerate() {
        let row = record?;
        let number = index + 1;

        let factor = row
            .factor
            .parse::<FactorKey>()
            .map_err(|source| ScoreRowError::UnknownFactor {
                row: number,
                source,
            })?;
        let score = row
            .score
            .map(|value| match value.parse::<f64>() {
                Ok(score) if score.is_finite() => Ok(score),
                _ => Err(ScoreRowError::InvalidScore { row: number, value }),
            })
            .transpose()?;

        records.push(ScoreRecord { factor, score });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(alias = "Factor", alias = "FACTOR")]
    factor: String,
    #[serde(
        alias = "Score",
        alias = "SCORE",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    score: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

//! CSV import of per-factor scores, for batch runs and the command line.
//!
//! The expected layout is a `factor,score` header followed by one row per factor. Blank scores
//! are skipped so exports can list every factor and fill in only what is known.

mod parser;

pub use parser::ScoreRowError;

use crate::estimation::FactorScoreMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ScoreImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row(ScoreRowError),
}

impl std::fmt::Display for ScoreImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreImportError::Io(err) => write!(f, "failed to read score file: {}", err),
            ScoreImportError::Csv(err) => write!(f, "invalid score CSV data: {}", err),
            ScoreImportError::Row(err) => write!(f, "invalid score row: {}", err),
        }
    }
}

impl std::error::Error for ScoreImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreImportError::Io(err) => Some(err),
            ScoreImportError::Csv(err) => Some(err),
            ScoreImportError::Row(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScoreImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScoreImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<ScoreRowError> for ScoreImportError {
    fn from(err: ScoreRowError) -> Self {
        Self::Row(err)
    }
}

pub struct ScoreImporter;

impl ScoreImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FactorScoreMap, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Later rows win when a factor appears more than once.
    pub fn from_reader<R: Read>(reader: R) -> Result<FactorScoreMap, ScoreImportError> {
        let mut scores = FactorScoreMap::new();
        for record in parser::parse_records(reader)? {
            if let Some(score) = record.score {
                scores.insert(record.factor, score);
            }
        }
        Ok(scores)
    }
}

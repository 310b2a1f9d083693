//! Error kinds raised by the rating pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::analyzers::types::Metric;

#[derive(Error, Debug)]
pub enum RaterError {
    /// A structurally broken or unparseable CSV row. Aborts the whole run.
    #[error("file {file}, line {line}: {reason}")]
    MalformedRow {
        file: String,
        line: u64,
        reason: String,
    },

    /// A rent series too short to fit a line through.
    #[error("cannot fit a trend through {points} point(s)")]
    DegenerateSeries { points: usize },

    /// Every ZIP in the cohort shares the same value, so the range is empty.
    #[error("cohort range for {metric} is empty (max == min == {value})")]
    DegenerateCohort { metric: Metric, value: f64 },

    #[error("cannot open {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RaterError {
    /// Builds a [`RaterError::MalformedRow`] from a csv error, keeping its line number.
    pub fn from_csv(file: &str, err: &csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        RaterError::MalformedRow {
            file: file.to_string(),
            line,
            reason: err.to_string(),
        }
    }
}

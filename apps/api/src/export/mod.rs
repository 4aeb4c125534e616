//! Export of a completed scoring request as a downloadable artifact.
//!
//! Three independent renderers over one `ExportBundle`: a JSON dump, a CSV
//! score summary and a plain-text report. All of them are pure; the date is
//! passed in rather than read from the clock.

pub mod bundle;
pub mod label;
pub mod narrative;
pub mod structured;
pub mod tabular;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bundle::{ExportBundle, SourceFiles};
pub use label::ScoreView;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Report,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Report => "text/plain; charset=utf-8",
        }
    }

    pub fn filename(self, date: NaiveDate) -> String {
        let date = date.format("%Y-%m-%d");
        match self {
            ExportFormat::Json => format!("cv-scoring-results-{date}.json"),
            ExportFormat::Csv => format!("cv-scoring-summary-{date}.csv"),
            ExportFormat::Report => format!("cv-scoring-report-{date}.txt"),
        }
    }
}

/// A rendered export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub body: String,
    pub filename: String,
    pub mime: &'static str,
}

pub fn render(
    bundle: &ExportBundle,
    format: ExportFormat,
    date: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let body = match format {
        ExportFormat::Json => structured::render_dump(bundle)?,
        ExportFormat::Csv => tabular::render_summary(bundle)?,
        ExportFormat::Report => narrative::render_report(bundle, date)?,
    };
    Ok(ExportArtifact {
        body,
        filename: format.filename(date),
        mime: format.mime(),
    })
}
